#![no_main]

use libfuzzer_sys::fuzz_target;
use redeploy::{Revision, UpdateStatus};

fuzz_target!(|data: &[u8]| {
    let raw = String::from_utf8_lossy(data);
    let revision = Revision::new(raw.as_ref());

    // Short form is always a prefix, even for multi-byte input
    assert!(revision.as_str().starts_with(revision.short()));
    assert_eq!(
        UpdateStatus::between(&revision, &revision.clone()),
        UpdateStatus::Unchanged
    );
});
