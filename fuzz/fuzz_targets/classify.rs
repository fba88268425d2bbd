#![no_main]

use libfuzzer_sys::fuzz_target;
use skill_forge::{Classification, SourceClassifier};

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    let classifier = SourceClassifier::new("/nonexistent-home");
    if let Classification::Source(descriptor) = classifier.classify(input) {
        assert!(!descriptor.name().is_empty());
        let _ = descriptor.label();
    }
});
