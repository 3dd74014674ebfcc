//! Bindings to `csrc/wordbuf.c`, a small C library compiled with
//! `alloc_hooks.h` force-included. It exists only to test interposition on
//! unmodified C and is never published.

use std::ffi::c_char;

// The C objects call `alloc_hooks_*`; keep the crate that defines them linked.
use alloc_hooks as _;

#[repr(C)]
pub struct WordBuf {
    _private: [u8; 0],
}

extern "C" {
    pub fn wordbuf_new() -> *mut WordBuf;
    pub fn wordbuf_push(buf: *mut WordBuf, word: *const c_char) -> i32;
    pub fn wordbuf_count(buf: *const WordBuf) -> usize;
    pub fn wordbuf_footprint(buf: *const WordBuf) -> usize;
    pub fn wordbuf_last(buf: *const WordBuf) -> *mut c_char;
    pub fn wordbuf_release_word(word: *mut c_char);
    pub fn wordbuf_free(buf: *mut WordBuf);
}
