#![no_main]

use libfuzzer_sys::fuzz_target;

use domain::command::template::{CommandTemplate, LinkTemplate};

// Fuzz command/link template parsing and substitution.
//
// Splits the input into a raw template and a value; parse + substitute
// must never panic regardless of placeholder position or content.
fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        if text.len() > 16 * 1024 {
            return;
        }
        let mut mid = text.len() / 2;
        while !text.is_char_boundary(mid) {
            mid -= 1;
        }
        let (raw, value) = text.split_at(mid);

        if let Ok(template) = CommandTemplate::parse(raw) {
            let _ = template.substitute(value);
            let _ = template.rendered(value);
        }
        if let Ok(link) = LinkTemplate::parse(raw) {
            let _ = link.substitute(value);
        }
    }
});
