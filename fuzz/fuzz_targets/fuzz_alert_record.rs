#![no_main]

use libfuzzer_sys::fuzz_target;

use domain::alert::entity::AlertRecord;

// Fuzz alert document deserialization with arbitrary JSON input.
fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        if text.len() > 64 * 1024 {
            return;
        }
        if let Ok(record) = serde_json::from_str::<AlertRecord>(text) {
            let _ = record.field_value("src_ip");
        }
    }
});
