#![no_main]

use libfuzzer_sys::fuzz_target;
use skill_forge::{format_frontmatter, parse_manifest};

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        let _ = parse_manifest(input);
        let wrapped = format!("---\n{input}\n---\n");
        if let Ok(manifest) = parse_manifest(&wrapped) {
            // Anything we parsed must render back without panicking.
            let _ = format_frontmatter(&manifest.metadata);
        }
    }
});
