use vitae_document::cv_json_schema;

fn main() {
    let schema = cv_json_schema();
    let json = serde_json::to_string_pretty(&schema).expect("serialize cv json schema");
    println!("{json}");
}
