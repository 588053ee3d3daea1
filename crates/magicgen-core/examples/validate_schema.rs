use std::env;

use magicgen_core::{load_schema, validate_schema};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let source = env::args()
        .nth(1)
        .ok_or("usage: validate_schema <SCHEMA_JSON_OR_PATH>")?;

    let raw = load_schema(&source)?;
    let schema = match validate_schema(&raw) {
        Ok(schema) => schema,
        Err(err) => {
            eprintln!("schema validation failed: {err}");
            std::process::exit(1);
        }
    };

    for field in schema.fields() {
        println!("{}\t{}", field.name, field.spec);
    }
    Ok(())
}
