#![expect(unsafe_code, reason = "A hand-written owner builds its views from raw parts.")]

use core::mem::ManuallyDrop;
use core::ptr::NonNull;
use std::collections::{LinkedList, VecDeque};

use sv_span::{RawSpan, Span, SpanMut};
use sv_storage::{BufferMutable, ContiguousStorage, ContiguousStorageMut, StorageAccess};

// -----------------------------------------------------------------------------
// A container managing its own allocation

struct Buffer<T> {
    ptr: NonNull<T>,
    len: usize,
    cap: usize,
}

impl<T> Buffer<T> {
    fn from_vec(values: Vec<T>) -> Self {
        let mut values = ManuallyDrop::new(values);
        Self {
            ptr: NonNull::new(values.as_mut_ptr()).unwrap(),
            len: values.len(),
            cap: values.capacity(),
        }
    }

    fn truncate(&mut self, len: usize) {
        while self.len > len {
            self.len -= 1;
            unsafe { self.ptr.add(self.len).drop_in_place() };
        }
    }
}

impl<T> Drop for Buffer<T> {
    fn drop(&mut self) {
        drop(unsafe { Vec::from_raw_parts(self.ptr.as_ptr(), self.len, self.cap) });
    }
}

impl<T> ContiguousStorage for Buffer<T> {
    type Element = T;

    fn storage(&self) -> Span<'_, T> {
        unsafe { Span::from_raw_parts(self.ptr.as_ptr(), self.len, self) }
    }
}

impl<T> ContiguousStorageMut for Buffer<T> {
    fn storage_mut(&mut self) -> SpanMut<'_, T> {
        let ptr = self.ptr.as_ptr();
        let len = self.len;
        unsafe { SpanMut::from_raw_parts(ptr, len, self) }
    }
}

// -----------------------------------------------------------------------------
// Algorithms written against the capabilities

fn mean<S>(values: &S) -> f64
where
    S: StorageAccess + ?Sized,
    S::Element: Copy + Into<f64>,
{
    values.with_storage(|span| {
        let sum: f64 = span.iter().map(|&value| value.into()).sum();
        sum / span.len() as f64
    })
}

fn reverse<B: BufferMutable + ?Sized>(buffer: &mut B) -> bool {
    buffer
        .with_mutable_buffer(|mut span| {
            let len = span.len();
            for i in 0..len / 2 {
                span.swap_at(i, len - 1 - i);
            }
        })
        .is_some()
}

// -----------------------------------------------------------------------------
// Tests

#[test]
fn custom_owner_vends_its_elements() {
    let buffer = Buffer::from_vec(vec![1u32, 2, 3, 4, 5]);
    let span = buffer.storage();

    assert_eq!(span.len(), 5);
    assert_eq!(span, [1, 2, 3, 4, 5]);
    assert_eq!(span.as_ptr(), buffer.ptr.as_ptr().cast_const());
    assert_eq!(span.prefix(2), [1, 2]);
    assert_eq!(span.as_raw_span().load::<u32>(12), 4);
}

#[test]
fn custom_owner_tracks_logical_length() {
    let names = vec![String::from("a"), String::from("b"), String::from("c")];
    let mut buffer = Buffer::from_vec(names);
    assert_eq!(buffer.storage().len(), 3);

    buffer.truncate(1);
    let span = buffer.storage();
    assert_eq!(span.len(), 1);
    assert_eq!(span[0], "a");

    let empty = Buffer::<u64>::from_vec(Vec::new());
    assert!(empty.storage().is_empty());
}

#[test]
fn mean_over_any_storage() {
    let buffer = Buffer::from_vec(vec![1.0f32, 2.0, 6.0]);
    assert_eq!(mean(&buffer), 3.0);
    assert_eq!(mean(&vec![2u8, 4]), 3.0);
    assert_eq!(mean(&[1i32, 2, 3, 6][..]), 3.0);
    assert_eq!(mean("\u{1}\u{3}"), 2.0);

    let mut ring = VecDeque::with_capacity(4);
    ring.extend([3u16, 4, 5]);
    ring.push_front(0);
    assert!(!ring.as_slices().1.is_empty());
    assert_eq!(mean(&ring), 3.0);
}

#[test]
fn in_place_algorithms() {
    let mut buffer = Buffer::from_vec(vec![1, 2, 3, 4]);
    assert!(reverse(&mut buffer));
    assert_eq!(buffer.storage(), [4, 3, 2, 1]);

    let mut values = vec![1, 2, 3];
    assert!(reverse(&mut values));
    assert_eq!(values, [3, 2, 1]);

    let mut array = [1, 2];
    assert!(reverse(&mut array));
    assert!(reverse(&mut array[..]));
    assert_eq!(array, [1, 2]);

    let mut ring = VecDeque::with_capacity(4);
    ring.extend([2, 3, 4]);
    ring.push_front(1);
    assert!(reverse(&mut ring));
    assert!(ring.iter().eq(&[4, 3, 2, 1]));

    let mut list: LinkedList<_> = [1, 2, 3].into_iter().collect();
    assert!(!reverse(&mut list));
    assert!(list.iter().eq(&[1, 2, 3]));
}

#[test]
fn writes_through_custom_owner() {
    let mut buffer = Buffer::from_vec(vec![0u16; 4]);
    {
        let mut span = buffer.storage_mut();
        span[0] = 0x0102;
        span.as_bytes_mut()[2..4].copy_from_slice(&0x0304u16.to_ne_bytes());
        let (_, mut tail) = span.split_at(2);
        tail.as_mut_slice().fill(7);
    }
    assert_eq!(buffer.storage(), [0x0102, 0x0304, 7, 7]);
}

#[test]
fn parses_packed_records() {
    // magic: u32, version: u16, flags: u8, then a u32 length, all packed.
    let mut record = Vec::new();
    record.extend_from_slice(&0xfeed_beefu32.to_le_bytes());
    record.extend_from_slice(&3u16.to_le_bytes());
    record.push(0b101);
    record.extend_from_slice(&42u32.to_le_bytes());

    let raw = RawSpan::from(record.storage());
    assert_eq!(raw.len(), 11);
    assert_eq!(u32::from_le(raw.load_unaligned::<u32>(0)), 0xfeed_beef);
    assert_eq!(u16::from_le(raw.load_unaligned::<u16>(4)), 3);
    assert_eq!(raw.load::<u8>(6), 0b101);
    assert_eq!(u32::from_le(raw.load_unaligned::<u32>(7)), 42);

    let payload = raw.drop_first(7);
    assert!(payload.is_within(&raw));
    assert_eq!(payload.indices_within(&raw), Some(7..11));
}
