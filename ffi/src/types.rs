//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type but uses C-compatible representations:
//! `*mut c_char` instead of `String`, raw pointers instead of `Vec`, and
//! enums with explicit discriminants. Conversion functions live here to keep
//! `lib.rs` focused on the `extern "C"` surface.

use std::ffi::CString;
use std::os::raw::c_char;

use character_core::present::{filter_button_label, picker_options, picker_title, PickerOption};
use character_core::{Character, CharacterListView, FetchError, FetchOutcome, FilterChoice, HttpRequest, StatusTone};

/// Opaque handle to a `CharacterClient`.
pub struct FfiCharacterClient {
    pub(crate) inner: character_core::CharacterClient,
}

/// Opaque handle to a `CharacterListView`.
pub struct FfiCharacterView {
    pub(crate) inner: CharacterListView,
}

/// Heap-allocate `s` as a C string. Interior NULs yield an empty string.
pub(crate) fn into_c_string(s: impl Into<Vec<u8>>) -> *mut c_char {
    CString::new(s).unwrap_or_default().into_raw()
}

/// Release a string from `into_c_string`. Null is ignored.
pub(crate) fn free_c_string(s: *mut c_char) {
    if !s.is_null() {
        drop(unsafe { CString::from_raw(s) });
    }
}

/// Move `items` to the heap and hand out `(ptr, len)`; null when empty.
fn into_raw_parts<T>(items: Vec<T>) -> (*mut T, u32) {
    if items.is_empty() {
        return (std::ptr::null_mut(), 0);
    }
    let mut items = items.into_boxed_slice();
    let len = items.len() as u32;
    let ptr = items.as_mut_ptr();
    std::mem::forget(items);
    (ptr, len)
}

/// Reclaim a slice from `into_raw_parts`.
unsafe fn from_raw_parts<T>(ptr: *mut T, len: u32) -> Vec<T> {
    if ptr.is_null() || len == 0 {
        return Vec::new();
    }
    unsafe { Box::from_raw(std::ptr::slice_from_raw_parts_mut(ptr, len as usize)) }.into_vec()
}

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

/// A single HTTP header as a key-value pair of C strings.
#[repr(C)]
pub struct FfiHeader {
    pub key: *mut c_char,
    pub value: *mut c_char,
}

/// A GET request the host must execute.
///
/// `url` is absolute with the query already encoded. `token` must be passed
/// back to `character_view_complete` / `character_view_fail`; it is 0 for
/// requests built outside a view.
#[repr(C)]
pub struct FfiHttpRequest {
    pub token: u64,
    pub url: *mut c_char,
    pub headers: *mut FfiHeader,
    pub headers_len: u32,
}

impl FfiHttpRequest {
    /// Convert a core `HttpRequest` into a heap-allocated `FfiHttpRequest`.
    pub(crate) fn from_core(token: u64, req: HttpRequest) -> Result<*mut Self, FetchError> {
        let url = req.url()?;
        let headers: Vec<FfiHeader> = req
            .headers
            .into_iter()
            .map(|(k, v)| FfiHeader {
                key: into_c_string(k),
                value: into_c_string(v),
            })
            .collect();
        let (headers, headers_len) = into_raw_parts(headers);

        Ok(Box::into_raw(Box::new(FfiHttpRequest {
            token,
            url: into_c_string(url.to_string()),
            headers,
            headers_len,
        })))
    }

    /// Free a request returned by `from_core`.
    pub(crate) unsafe fn free(req: *mut Self) {
        let req = unsafe { Box::from_raw(req) };
        free_c_string(req.url);
        for h in unsafe { from_raw_parts(req.headers, req.headers_len) } {
            free_c_string(h.key);
            free_c_string(h.value);
        }
    }
}

// ---------------------------------------------------------------------------
// Response input (caller-provided, not heap-allocated by us)
// ---------------------------------------------------------------------------

/// An HTTP response described as C-compatible plain data.
///
/// The C caller constructs this on the stack after executing a request. The
/// FFI layer reads but does not free these fields.
#[repr(C)]
pub struct FfiHttpResponse {
    pub status: u16,
    pub body: *const c_char,
}

// ---------------------------------------------------------------------------
// Characters
// ---------------------------------------------------------------------------

/// Color class for a status string.
#[repr(C)]
pub enum FfiStatusTone {
    Neutral = 0,
    Alive = 1,
    Dead = 2,
}

impl From<StatusTone> for FfiStatusTone {
    fn from(tone: StatusTone) -> Self {
        match tone {
            StatusTone::Neutral => FfiStatusTone::Neutral,
            StatusTone::Alive => FfiStatusTone::Alive,
            StatusTone::Dead => FfiStatusTone::Dead,
        }
    }
}

/// A single character exposed to C.
#[repr(C)]
pub struct FfiCharacter {
    pub id: i64,
    pub name: *mut c_char,
    pub status: *mut c_char,
    pub species: *mut c_char,
    pub gender: *mut c_char,
    pub image: *mut c_char,
    pub tone: FfiStatusTone,
}

impl FfiCharacter {
    fn from_core(c: &Character) -> Self {
        FfiCharacter {
            id: c.id,
            name: into_c_string(c.name.as_str()),
            status: into_c_string(c.status.as_str()),
            species: into_c_string(c.species.as_str()),
            gender: into_c_string(c.gender.as_str()),
            image: into_c_string(c.image.as_str()),
            tone: StatusTone::from_status(&c.status).into(),
        }
    }

    fn free_fields(&self) {
        free_c_string(self.name);
        free_c_string(self.status);
        free_c_string(self.species);
        free_c_string(self.gender);
        free_c_string(self.image);
    }
}

/// A list of characters exposed to C, in server order.
#[repr(C)]
pub struct FfiCharacterList {
    pub items: *mut FfiCharacter,
    pub len: u32,
}

impl FfiCharacterList {
    pub(crate) fn from_core(characters: &[Character]) -> Self {
        let (items, len) = into_raw_parts(characters.iter().map(FfiCharacter::from_core).collect());
        FfiCharacterList { items, len }
    }

    pub(crate) fn empty() -> Self {
        FfiCharacterList {
            items: std::ptr::null_mut(),
            len: 0,
        }
    }

    pub(crate) unsafe fn free_items(&self) {
        for item in unsafe { from_raw_parts(self.items, self.len) } {
            item.free_fields();
        }
    }
}

// ---------------------------------------------------------------------------
// Parse result
// ---------------------------------------------------------------------------

/// Error codes returned in `FfiCharacterResult`.
#[repr(C)]
pub enum FfiErrorCode {
    Ok = 0,
    Transport = 1,
    Http = 2,
    Deserialization = 3,
    InvalidUrl = 4,
    Panic = 5,
    NullArg = 6,
}

/// Result envelope for `character_parse_fetch_characters`.
///
/// On success `error_code` is `Ok`, `error_message` is null and `characters`
/// holds the list. On failure `characters` is empty and `error_message` is a
/// human-readable C string.
#[repr(C)]
pub struct FfiCharacterResult {
    pub error_code: FfiErrorCode,
    pub error_message: *mut c_char,
    pub http_status: u16,
    pub characters: FfiCharacterList,
}

impl FfiCharacterResult {
    pub(crate) fn ok(characters: &[Character]) -> *mut Self {
        Box::into_raw(Box::new(FfiCharacterResult {
            error_code: FfiErrorCode::Ok,
            error_message: std::ptr::null_mut(),
            http_status: 0,
            characters: FfiCharacterList::from_core(characters),
        }))
    }

    pub(crate) fn from_error(err: FetchError) -> *mut Self {
        let (error_code, http_status) = match &err {
            FetchError::Transport(_) => (FfiErrorCode::Transport, 0),
            FetchError::Http { status, .. } => (FfiErrorCode::Http, *status),
            FetchError::Deserialization(_) => (FfiErrorCode::Deserialization, 0),
            FetchError::InvalidUrl(_) => (FfiErrorCode::InvalidUrl, 0),
        };
        Self::failure(error_code, http_status, err.to_string())
    }

    pub(crate) fn null_arg(name: &str) -> *mut Self {
        Self::failure(FfiErrorCode::NullArg, 0, format!("null argument: {name}"))
    }

    pub(crate) fn panic(msg: &str) -> *mut Self {
        Self::failure(FfiErrorCode::Panic, 0, msg.to_string())
    }

    fn failure(error_code: FfiErrorCode, http_status: u16, msg: String) -> *mut Self {
        Box::into_raw(Box::new(FfiCharacterResult {
            error_code,
            error_message: into_c_string(msg),
            http_status,
            characters: FfiCharacterList::empty(),
        }))
    }
}

// ---------------------------------------------------------------------------
// View
// ---------------------------------------------------------------------------

/// What the view did with a reported fetch result.
#[repr(C)]
#[derive(Debug, PartialEq, Eq)]
pub enum FfiFetchOutcome {
    Applied = 0,
    Failed = 1,
    Stale = 2,
    NullArg = 3,
    Panic = 4,
}

impl From<FetchOutcome> for FfiFetchOutcome {
    fn from(outcome: FetchOutcome) -> Self {
        match outcome {
            FetchOutcome::Applied => FfiFetchOutcome::Applied,
            FetchOutcome::Failed => FfiFetchOutcome::Failed,
            FetchOutcome::Stale => FfiFetchOutcome::Stale,
        }
    }
}

/// Everything a host needs to draw the screen once.
#[repr(C)]
pub struct FfiViewSnapshot {
    pub loading: bool,
    pub gender_picker_open: bool,
    pub status_picker_open: bool,
    /// Filter button texts, e.g. "Gender" or "Female".
    pub gender_label: *mut c_char,
    pub status_label: *mut c_char,
    pub characters: FfiCharacterList,
}

impl FfiViewSnapshot {
    pub(crate) fn from_view(view: &CharacterListView) -> *mut Self {
        let filters = view.filters();
        Box::into_raw(Box::new(FfiViewSnapshot {
            loading: view.is_loading(),
            gender_picker_open: view.is_gender_picker_open(),
            status_picker_open: view.is_status_picker_open(),
            gender_label: into_c_string(filter_button_label(filters.gender)),
            status_label: into_c_string(filter_button_label(filters.status)),
            characters: FfiCharacterList::from_core(view.characters()),
        }))
    }
}

// ---------------------------------------------------------------------------
// Pickers
// ---------------------------------------------------------------------------

/// Which filter a picker edits.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiFilterKind {
    Gender = 0,
    Status = 1,
}

/// One picker row. `code` is what `character_view_choose_*` expects back.
#[repr(C)]
pub struct FfiPickerRow {
    pub code: i32,
    pub label: *mut c_char,
}

/// A picker modal: title plus rows top to bottom ("All", candidates,
/// "Cancel").
#[repr(C)]
pub struct FfiPicker {
    pub title: *mut c_char,
    pub rows: *mut FfiPickerRow,
    pub rows_len: u32,
}

impl FfiPicker {
    pub(crate) fn build<F: FilterChoice>(cancel_code: i32) -> *mut Self {
        let mut next_code = 0;
        let rows: Vec<FfiPickerRow> = picker_options::<F>()
            .into_iter()
            .map(|option| {
                let code = match &option {
                    PickerOption::Cancel => cancel_code,
                    PickerOption::All | PickerOption::Value { .. } => {
                        next_code += 1;
                        next_code - 1
                    }
                };
                FfiPickerRow {
                    code,
                    label: into_c_string(option.label()),
                }
            })
            .collect();
        let (rows, rows_len) = into_raw_parts(rows);
        Box::into_raw(Box::new(FfiPicker {
            title: into_c_string(picker_title::<F>()),
            rows,
            rows_len,
        }))
    }

    pub(crate) unsafe fn free(picker: *mut Self) {
        let picker = unsafe { Box::from_raw(picker) };
        free_c_string(picker.title);
        for row in unsafe { from_raw_parts(picker.rows, picker.rows_len) } {
            free_c_string(row.label);
        }
    }
}
