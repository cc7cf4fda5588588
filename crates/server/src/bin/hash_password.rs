use server::auth::password::hash_password;

/// Produce an Argon2id hash for seeding accounts by hand:
/// `cargo run --bin hash-password --features server -- 'the-password'`
fn main() {
    let password = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "change-me".to_string());

    match hash_password(&password) {
        Ok(hash) => println!("{hash}"),
        Err(e) => {
            eprintln!("Failed to hash password: {e}");
            std::process::exit(1);
        }
    }
}
