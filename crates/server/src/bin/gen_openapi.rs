use server::openapi::ApiDoc;
use utoipa::OpenApi;

/// Prints the OpenAPI document to stdout. CI captures the output so
/// REST consumers can diff endpoint changes between releases.
fn main() {
    match ApiDoc::openapi().to_pretty_json() {
        Ok(spec) => println!("{spec}"),
        Err(e) => {
            eprintln!("failed to serialize OpenAPI document: {e}");
            std::process::exit(1);
        }
    }
}
