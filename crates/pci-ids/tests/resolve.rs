use std::path::PathBuf;

use pci_ids::{Identity, IdentityResolver, StreamingScanner, VendorDatabase};

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data/pci.ids")
}

fn resolvers() -> Vec<(&'static str, Box<dyn IdentityResolver>)> {
    let eager = VendorDatabase::load(fixture_path()).unwrap();
    let streaming = StreamingScanner::load(fixture_path()).unwrap();
    vec![
        ("eager", Box::new(eager) as Box<dyn IdentityResolver>),
        ("streaming", Box::new(streaming)),
    ]
}

fn names(resolver: &dyn IdentityResolver, vendor: &str, device: &str) -> (String, String) {
    let id = resolver.resolve(vendor, device);
    (id.vendor_name, id.device_name)
}

#[test]
fn resolves_known_device() {
    for (strategy, resolver) in resolvers() {
        assert_eq!(
            names(&*resolver, "8086", "1237"),
            (
                "Intel Corporation".to_owned(),
                "440FX - 82441FX PMC [Natoma]".to_owned()
            ),
            "{strategy}"
        );
    }
}

#[test]
fn unknown_ids_resolve_to_themselves() {
    for (strategy, resolver) in resolvers() {
        assert_eq!(
            resolver.resolve("ffff", "ffff"),
            Identity::unresolved("ffff", "ffff"),
            "{strategy}"
        );
    }
}

#[test]
fn known_vendor_unknown_device() {
    for (strategy, resolver) in resolvers() {
        assert_eq!(
            names(&*resolver, "1234", "1111"),
            ("Technical Corp.".to_owned(), "1111".to_owned()),
            "{strategy}"
        );
    }
}

#[test]
fn sub_device_ids_are_not_device_matches() {
    for (strategy, resolver) in resolvers() {
        // 12a2 and 0001 only appear as subsystem ids under these vendors.
        assert_eq!(resolver.resolve("10de", "12a2").device_name, "12a2", "{strategy}");
        assert_eq!(resolver.resolve("1af4", "0001").device_name, "0001", "{strategy}");
        assert_eq!(
            resolver.resolve("10de", "1eb8").device_name,
            "TU104GL [Tesla T4]",
            "{strategy}"
        );
    }
}

#[test]
fn sub_device_ids_inside_the_block_do_not_shadow_devices() {
    for (strategy, resolver) in resolvers() {
        // Both ids also appear earlier in the same block as subsystem ids.
        assert_eq!(
            resolver.resolve("1af4", "1001").device_name,
            "Virtio block device",
            "{strategy}"
        );
        assert_eq!(
            resolver.resolve("8086", "10d3").device_name,
            "82574L Gigabit Network Connection",
            "{strategy}"
        );
    }
}

#[test]
fn devices_of_later_vendors_do_not_leak() {
    for (strategy, resolver) in resolvers() {
        assert_eq!(
            names(&*resolver, "0e11", "1000"),
            ("Compaq Computer Corporation".to_owned(), "1000".to_owned()),
            "{strategy}"
        );
    }
}

#[test]
fn class_section_ends_the_last_vendor() {
    for (strategy, resolver) in resolvers() {
        assert_eq!(
            resolver.resolve("8086", "a348").device_name,
            "Cannon Lake PCH cAVS",
            "{strategy}"
        );
        // Sub-class lines of the class section are not devices.
        assert_eq!(resolver.resolve("8086", "04").device_name, "04", "{strategy}");
    }
}

#[test]
fn numeric_ids_are_zero_padded_lowercase() {
    for (strategy, resolver) in resolvers() {
        let id = resolver.resolve_ids(0x0e11, 0xae10);
        assert_eq!(id.vendor_id, "0e11", "{strategy}");
        assert_eq!(id.device_name, "Smart-2/P RAID Controller", "{strategy}");
    }
}

#[test]
fn repeated_lookups_are_identical() {
    for (strategy, resolver) in resolvers() {
        let first = resolver.resolve("1af4", "1042");
        for _ in 0..3 {
            assert_eq!(resolver.resolve("1af4", "1042"), first, "{strategy}");
        }
    }
}

#[test]
fn eager_database_contents() {
    let db = VendorDatabase::load(fixture_path()).unwrap();
    let vendors: Vec<&str> = db.iter().map(|(id, _)| id).collect();
    assert_eq!(vendors, ["0e11", "10de", "1234", "1af4", "8086"]);
    assert_eq!(db.vendor("1234").unwrap().devices().count(), 0);
    assert_eq!(db.vendor("8086").unwrap().devices().count(), 6);
}

#[test]
fn one_database_serves_many_threads() {
    let db = VendorDatabase::load(fixture_path()).unwrap();
    std::thread::scope(|s| {
        for device in ["100e", "10d3", "7000", "7010"] {
            let db = &db;
            s.spawn(move || {
                let id = db.resolve("8086", device);
                assert_eq!(id.vendor_name, "Intel Corporation");
                assert_ne!(id.device_name, device);
            });
        }
    });
}
