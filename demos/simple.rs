use tokenweave::source::MemorySource;
use tokenweave::{analyze, Layer};

fn main() {
    let primitive = r#"{
        "meta": {
            "variableCollections": {
                "VariableCollectionId:1:0": {
                    "name": "Colors",
                    "defaultModeId": "1:0",
                    "modes": [{ "modeId": "1:0", "name": "Value" }]
                }
            },
            "variables": {
                "VariableID:1:1": {
                    "name": "base/blue",
                    "variableCollectionId": "VariableCollectionId:1:0",
                    "resolvedType": "COLOR",
                    "valuesByMode": { "1:0": { "r": 0.0784, "g": 0.5176, "b": 1, "a": 1 } }
                }
            }
        }
    }"#;
    let semantic = r#"{
        "meta": {
            "variableCollections": {
                "VariableCollectionId:2:0": {
                    "name": "Theme",
                    "defaultModeId": "2:0",
                    "modes": [{ "modeId": "2:0", "name": "Light" }]
                }
            },
            "variables": {
                "VariableID:2:1": {
                    "name": "primary",
                    "variableCollectionId": "VariableCollectionId:2:0",
                    "resolvedType": "COLOR",
                    "valuesByMode": { "2:0": { "type": "VARIABLE_ALIAS", "id": "VariableID:1:1" } }
                }
            }
        }
    }"#;

    let source = MemorySource::new()
        .with_layer(Layer::Primitive, "tokens.primitive.json", primitive)
        .with_layer(Layer::Semantic, "tokens.semantic.json", semantic);

    match analyze(&source) {
        Ok(analysis) => {
            println!("{}", analysis.to_css());
            if let Some(resolution) = analysis.resolve("kds-sys-color-primary", None) {
                println!("primary resolves to {} in {} hops", resolution.value, resolution.chain.len());
            }
        }
        Err(e) => {
            eprintln!("Failed to load tokens: {e:?}");
        }
    }
}
