#![no_main]

use libfuzzer_sys::fuzz_target;

use domain::playbook::entity::PlaybookMapping;
use domain::playbook::linker::PlaybookLinker;

// Fuzz linker construction and lookup with arbitrary mapping tables.
//
// Lines become mappings (first field the playbook name, the rest alert
// names); load must reject bad tables without panicking and lookups must
// never panic.
fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if text.len() > 16 * 1024 {
        return;
    }

    let mappings: Vec<PlaybookMapping> = text
        .lines()
        .map(|line| {
            let mut parts = line.split(',');
            PlaybookMapping {
                name: parts.next().unwrap_or_default().to_string(),
                alert_names: parts.map(ToString::to_string).collect(),
            }
        })
        .collect();

    if let Ok(linker) = PlaybookLinker::load(mappings) {
        let _ = linker.playbooks_for(text.lines().next().unwrap_or_default());
        let _ = linker.playbooks_for("SSH Brute Force");
    }
});
