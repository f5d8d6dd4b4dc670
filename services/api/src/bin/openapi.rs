//! services/api/src/bin/openapi.rs
//!
//! This binary generates the OpenAPI 3.0 document for the lounge directory API
//! and saves it to a file named `openapi.json`.

use api_lib::web::rest::ApiDoc;
use utoipa::OpenApi;

/// Serializes the OpenAPI document and writes it to `path`.
fn write_openapi(
    api_doc: utoipa::openapi::OpenApi,
    path: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let json = api_doc.to_pretty_json()?;
    std::fs::write(path, json)?;
    println!("OpenAPI document written to {}", path);
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Generate the document from the shared ApiDoc and save it to `openapi.json`.
    write_openapi(ApiDoc::openapi(), "openapi.json")?;
    Ok(())
}
