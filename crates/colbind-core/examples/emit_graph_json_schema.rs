use colbind_core::TypeGraph;
use schemars::schema_for;

fn main() {
    let schema = schema_for!(TypeGraph);
    let json = serde_json::to_string_pretty(&schema).expect("serialize json schema");
    println!("{json}");
}
