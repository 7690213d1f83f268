// Byte resource tests
// The same checks run against the in-memory and file-backed resources.

use std::io::Write;

use pellets::resource::{scan_from_last_whitespace_to_end, scan_to_next_whitespace_or_end};
use pellets::{ByteResource, Error, FileResource, MemoryResource, ScanLimits};

/// Helper: a file-backed resource holding `data`.
fn file_resource(data: &[u8], writeable: bool) -> FileResource {
    let mut file = tempfile::tempfile().unwrap();
    file.write_all(data).unwrap();
    FileResource::from_file(file, writeable)
}

fn check_empty<R: ByteResource>(mut resource: R) {
    assert!(matches!(resource.read(0, 1, true), Err(Error::Truncated { .. })));

    let chunk = resource.read(0, 0, true).unwrap();
    assert!(chunk.bytes.is_empty());
    assert!(chunk.at_eof);

    let chunk = resource.read(0, 100, false).unwrap();
    assert!(chunk.bytes.is_empty());
    assert!(chunk.at_eof);

    assert!(matches!(resource.read(1, 1, false), Err(Error::OutOfRange { .. })));
    assert!(scan_from_last_whitespace_to_end(&resource, ScanLimits::default()).unwrap().is_none());
    assert_eq!(scan_to_next_whitespace_or_end(&resource, 0, ScanLimits::default()).unwrap(), b"");
    assert!(matches!(resource.append(b"abc"), Err(Error::ReadOnly)));
}

fn check_append<R: ByteResource>(mut resource: R) {
    assert!(matches!(resource.read(0, 1, true), Err(Error::Truncated { .. })));
    assert_eq!(resource.append(b"1").unwrap(), 0);
    let chunk = resource.read(0, 1, true).unwrap();
    assert_eq!(chunk.bytes, b"1");
    assert!(chunk.at_eof);
    assert_eq!(resource.append(b"23").unwrap(), 1);
    assert_eq!(resource.length().unwrap(), 3);
}

fn check_space<R: ByteResource>(resource: R) {
    let chunk = resource.read(0, 1, true).unwrap();
    assert_eq!(chunk.bytes, b" ");
    assert!(chunk.at_eof);

    let chunk = resource.read(1, 0, true).unwrap();
    assert!(chunk.bytes.is_empty());
    assert!(chunk.at_eof);

    let chunk = resource.read(1, 100, false).unwrap();
    assert!(chunk.bytes.is_empty());
    assert!(chunk.at_eof);

    assert!(matches!(resource.read(2, 1, false), Err(Error::OutOfRange { .. })));

    let tail = scan_from_last_whitespace_to_end(&resource, ScanLimits::default()).unwrap().unwrap();
    assert!(tail.bytes.is_empty());
    assert_eq!(tail.start, 1);
    assert_eq!(scan_to_next_whitespace_or_end(&resource, 0, ScanLimits::default()).unwrap(), b"");
}

fn check_short_tokens<R: ByteResource>(resource: R) {
    // " aa b"
    let chunk = resource.read(2, 2, true).unwrap();
    assert_eq!(chunk.bytes, b"a ");
    assert!(!chunk.at_eof);

    let chunk = resource.read(5, 0, true).unwrap();
    assert!(chunk.bytes.is_empty());
    assert!(chunk.at_eof);

    let chunk = resource.read(5, 100, false).unwrap();
    assert!(chunk.bytes.is_empty());
    assert!(chunk.at_eof);

    assert!(matches!(resource.read(6, 1, false), Err(Error::OutOfRange { .. })));

    let tail = scan_from_last_whitespace_to_end(&resource, ScanLimits::default()).unwrap().unwrap();
    assert_eq!(tail.bytes, b"b");
    assert_eq!(tail.start, 4);

    let limits = ScanLimits::default();
    assert_eq!(scan_to_next_whitespace_or_end(&resource, 1, limits).unwrap(), b"aa");
    assert_eq!(scan_to_next_whitespace_or_end(&resource, 4, limits).unwrap(), b"b");
}

fn larger_text() -> (Vec<u8>, Vec<u8>, Vec<u8>) {
    let mut prefix = vec![b'a'; 99];
    prefix.push(b' ');
    let suffix = vec![b'x'; 123];
    let mut text = prefix.repeat(3);
    text.extend_from_slice(&suffix);
    (text, prefix, suffix)
}

fn check_larger<R: ByteResource>(resource: R) {
    let (text, prefix, suffix) = larger_text();
    let len = text.len() as u64;

    let chunk = resource.read(298, 3, true).unwrap();
    assert_eq!(chunk.bytes, b"a x");
    assert!(!chunk.at_eof);

    let chunk = resource.read(len, 0, true).unwrap();
    assert!(chunk.bytes.is_empty());
    assert!(chunk.at_eof);

    assert!(matches!(resource.read(len + 1, 1, false), Err(Error::OutOfRange { .. })));

    let tail = scan_from_last_whitespace_to_end(&resource, ScanLimits::default()).unwrap().unwrap();
    assert_eq!(tail.bytes, suffix);
    assert_eq!(tail.start, 300);

    let limits = ScanLimits::default();
    assert_eq!(scan_to_next_whitespace_or_end(&resource, 100, limits).unwrap(), &prefix[..99]);
    assert_eq!(scan_to_next_whitespace_or_end(&resource, 98, limits).unwrap(), b"a");
    assert_eq!(scan_to_next_whitespace_or_end(&resource, 422, limits).unwrap(), b"x");
}

fn check_bound<R: ByteResource>(resource: R) {
    let limits = ScanLimits::new(1, 2);
    assert!(matches!(
        scan_from_last_whitespace_to_end(&resource, limits),
        Err(Error::BoundNotFound { limit: 2 })
    ));
    assert!(matches!(
        scan_to_next_whitespace_or_end(&resource, 1, limits),
        Err(Error::BoundNotFound { limit: 2 })
    ));
}

// =============================================================================
// Test 1: Empty resource
// =============================================================================
#[test]
fn memory_empty() {
    check_empty(MemoryResource::new(Vec::new()));
}

#[test]
fn file_empty() {
    check_empty(file_resource(b"", false));
}

// =============================================================================
// Test 2: Appending to a writeable resource returns start offsets
// =============================================================================
#[test]
fn memory_append() {
    check_append(MemoryResource::writeable(Vec::new()));
}

#[test]
fn memory_read_only_refuses_append() {
    let mut resource = MemoryResource::new(b"abc".to_vec());
    assert!(!resource.is_writeable());
    assert!(matches!(resource.append(b"x"), Err(Error::ReadOnly)));
    assert_eq!(resource.as_bytes(), b"abc");

    let mut resource = MemoryResource::writeable(b"abc".to_vec());
    assert!(resource.is_writeable());
    assert_eq!(resource.append(b"x").unwrap(), 3);
    assert_eq!(resource.into_inner(), b"abcx");
}

#[test]
fn file_append() {
    check_append(file_resource(b"", true));
}

// =============================================================================
// Test 3: Single space
// =============================================================================
#[test]
fn memory_space() {
    check_space(MemoryResource::new(b" ".to_vec()));
}

#[test]
fn file_space() {
    check_space(file_resource(b" ", false));
}

// =============================================================================
// Test 4: " aa b" — short tokens either side of whitespace
// =============================================================================
#[test]
fn memory_short_tokens() {
    check_short_tokens(MemoryResource::new(b" aa b".to_vec()));
}

#[test]
fn file_short_tokens() {
    check_short_tokens(file_resource(b" aa b", false));
}

// =============================================================================
// Test 5: Trailing token longer than the initial scan window
// =============================================================================
#[test]
fn memory_larger() {
    let (text, _, _) = larger_text();
    check_larger(MemoryResource::new(text));
}

#[test]
fn file_larger() {
    let (text, _, _) = larger_text();
    check_larger(file_resource(&text, false));
}

// =============================================================================
// Test 6: No whitespace within the window bound
// =============================================================================
#[test]
fn memory_scan_bound() {
    check_bound(MemoryResource::new(vec![b'x'; 10_000]));
}

#[test]
fn file_scan_bound() {
    check_bound(file_resource(&vec![b'x'; 10_000], false));
}

// =============================================================================
// Test 7: All non-whitespace, window covers everything → not found
// =============================================================================
#[test]
fn no_whitespace_anywhere_is_not_found() {
    let resource = MemoryResource::new(vec![b'x'; 300]);
    let tail = scan_from_last_whitespace_to_end(&resource, ScanLimits::default()).unwrap();
    assert!(tail.is_none());
    let token = scan_to_next_whitespace_or_end(&resource, 10, ScanLimits::default()).unwrap();
    assert_eq!(token.len(), 290);
}

// =============================================================================
// Test 8: File length follows growth through another handle
// =============================================================================
#[test]
fn file_length_sees_external_growth() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pellets.dat");
    std::fs::write(&path, b"abc").unwrap();

    let reader = FileResource::open(&path).unwrap();
    assert_eq!(reader.length().unwrap(), 3);

    let mut writer = FileResource::open_writeable(&path).unwrap();
    assert_eq!(writer.append(b" def").unwrap(), 3);
    writer.sync().unwrap();

    assert_eq!(reader.length().unwrap(), 7);
    let tail = scan_from_last_whitespace_to_end(&reader, ScanLimits::default()).unwrap().unwrap();
    assert_eq!(tail.bytes, b"def");
    assert_eq!(tail.start, 4);
}

// =============================================================================
// Test 9: Read-only file refuses appends
// =============================================================================
#[test]
fn file_opened_read_only_refuses_append() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ro.dat");
    std::fs::write(&path, b"abc").unwrap();

    let mut resource = FileResource::open(&path).unwrap();
    assert!(!resource.is_writeable());
    assert!(matches!(resource.append(b"x"), Err(Error::ReadOnly)));
    assert_eq!(std::fs::read(&path).unwrap(), b"abc");
}
