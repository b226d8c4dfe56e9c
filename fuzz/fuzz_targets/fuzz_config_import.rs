#![no_main]

use fitroom_core::{LoadedAsset, LoadedMesh, Playground};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let mut playground = Playground::new();
    let _ = playground.load_asset(LoadedAsset::new("body").mesh(LoadedMesh::new(
        "torso",
        [("height", 0), ("waistUp", 1), ("waistDown", 2)],
    )));

    match playground.import_str(text) {
        Ok(_) => {
            // Whatever was accepted must export to something that validates again.
            let config = playground.export_config();
            let value = config.to_value().expect("export serializes");
            assert!(Playground::validate_config(&value).is_ok());
        }
        Err(issues) => assert!(!issues.is_empty()),
    }
});
