use hpackwire_core::{HeaderRef, StaticTable};

#[test]
fn first_and_last_entries() {
    assert_eq!(StaticTable::LEN, 61);
    assert_eq!(
        StaticTable::get(1),
        Some(HeaderRef {
            name: b":authority",
            value: b""
        })
    );
    assert_eq!(
        StaticTable::get(61),
        Some(HeaderRef {
            name: b"www-authenticate",
            value: b""
        })
    );
}

#[test]
fn out_of_range_indices() {
    assert_eq!(StaticTable::get(0), None);
    assert_eq!(StaticTable::get(62), None);
    assert_eq!(StaticTable::get(usize::MAX), None);
}

#[test]
fn status_codes_map_to_status_entries() {
    for status in [200u16, 204, 206, 304, 400, 404, 500] {
        let index = StaticTable::status_index(status).unwrap();
        let entry = StaticTable::get(index).unwrap();
        assert_eq!(entry.name, b":status");
        assert_eq!(entry.value, status.to_string().as_bytes());
    }
    assert_eq!(StaticTable::status_index(302), None);
}
