//! C-ABI wrapper around `character-core`.
//!
//! # Overview
//! Exposes the character client and the list view through `extern "C"`
//! functions so a mobile host can drive the screen without linking to Rust's
//! HTTP stack. The host executes every request it is handed and reports the
//! response (or its transport failure) back with the request's token.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - Filter arguments are integer codes: `0` is "All", `1..` index the
//!   candidate list in display order, `CHARACTER_CHOICE_CANCEL` closes the
//!   picker without a change.
//! - The C caller owns all returned pointers and must release them with the
//!   matching `character_free_*` / `*_free` function.

pub mod types;

use std::ffi::CStr;
use std::os::raw::c_char;
use std::panic::catch_unwind;

use character_core::{
    CharacterClient, CharacterListView, FetchError, FetchTicket, FilterChoice, Filters, GenderFilter, HttpResponse,
    Selection, StatusFilter,
};

use types::*;

/// Picker code for "Cancel".
pub const CHARACTER_CHOICE_CANCEL: i32 = -1;

/// Map a filter code onto a filter value; `None` if out of range.
fn decode_filter<F: FilterChoice>(code: i32) -> Option<F> {
    match code {
        0 => Some(F::default()),
        n if n > 0 => F::CANDIDATES.get(n as usize - 1).copied(),
        _ => None,
    }
}

fn decode_selection<F: FilterChoice>(code: i32) -> Option<Selection<F>> {
    if code == CHARACTER_CHOICE_CANCEL {
        return Some(Selection::Cancel);
    }
    decode_filter(code).map(Selection::Pick)
}

/// Read a nullable C string; invalid UTF-8 sequences are replaced.
fn read_c_str(s: *const c_char) -> String {
    if s.is_null() {
        return String::new();
    }
    unsafe { CStr::from_ptr(s) }.to_string_lossy().into_owned()
}

/// A body that is not UTF-8 cannot be JSON, so it fails as a parse error.
fn ffi_response_to_core(resp: &FfiHttpResponse) -> Result<HttpResponse, FetchError> {
    let body = if resp.body.is_null() {
        String::new()
    } else {
        unsafe { CStr::from_ptr(resp.body) }
            .to_str()
            .map_err(|e| FetchError::Deserialization(format!("response body is not valid UTF-8: {e}")))?
            .to_string()
    };
    Ok(HttpResponse {
        status: resp.status,
        headers: Vec::new(),
        body,
    })
}

/// Describe `ticket`'s request for the host. If the request cannot be
/// rendered the fetch is failed on the spot, so the view never waits on a
/// token the host was not given.
fn request_for_ticket(
    view: &mut CharacterListView,
    client: &CharacterClient,
    ticket: FetchTicket,
) -> *mut FfiHttpRequest {
    let req = client.build_fetch_characters(ticket.filters);
    match FfiHttpRequest::from_core(ticket.token.get(), req) {
        Ok(req) => req,
        Err(e) => {
            view.finish_fetch(ticket.token, Err(e));
            std::ptr::null_mut()
        }
    }
}

// ---------------------------------------------------------------------------
// Client lifecycle
// ---------------------------------------------------------------------------

/// Create a client bound to `base_url`, or to the public API when
/// `base_url` is null. Returns null if `base_url` is not an absolute URL.
///
/// The caller must free the returned pointer with `character_client_free`.
#[unsafe(no_mangle)]
pub extern "C" fn character_client_new(base_url: *const c_char) -> *mut FfiCharacterClient {
    catch_unwind(|| {
        let client = if base_url.is_null() {
            CharacterClient::default()
        } else {
            match CharacterClient::try_new(&read_c_str(base_url)) {
                Ok(client) => client,
                Err(_) => return std::ptr::null_mut(),
            }
        };
        Box::into_raw(Box::new(FfiCharacterClient { inner: client }))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a client created by `character_client_new`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn character_client_free(client: *mut FfiCharacterClient) {
    if !client.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(client) });
        });
    }
}

// ---------------------------------------------------------------------------
// Stateless fetch
// ---------------------------------------------------------------------------

/// Build the collection request for a filter pair (codes as in the module
/// docs; `CHARACTER_CHOICE_CANCEL` is not accepted here).
///
/// Returns null if `client` is null or a code is out of range.
#[unsafe(no_mangle)]
pub extern "C" fn character_build_fetch_characters(
    client: *const FfiCharacterClient,
    gender: i32,
    status: i32,
) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        let (Some(gender), Some(status)) = (decode_filter::<GenderFilter>(gender), decode_filter::<StatusFilter>(status))
        else {
            return std::ptr::null_mut();
        };
        let req = client.inner.build_fetch_characters(Filters::new(gender, status));
        FfiHttpRequest::from_core(0, req).unwrap_or(std::ptr::null_mut())
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Parse a collection response into a character list.
#[unsafe(no_mangle)]
pub extern "C" fn character_parse_fetch_characters(
    client: *const FfiCharacterClient,
    response: *const FfiHttpResponse,
) -> *mut FfiCharacterResult {
    catch_unwind(|| {
        if client.is_null() {
            return FfiCharacterResult::null_arg("client");
        }
        if response.is_null() {
            return FfiCharacterResult::null_arg("response");
        }
        let client = unsafe { &*client };
        let resp = unsafe { &*response };
        match ffi_response_to_core(resp).and_then(|r| client.inner.parse_fetch_characters(r)) {
            Ok(characters) => FfiCharacterResult::ok(&characters),
            Err(e) => FfiCharacterResult::from_error(e),
        }
    })
    .unwrap_or_else(|_| FfiCharacterResult::panic("panic in character_parse_fetch_characters"))
}

// ---------------------------------------------------------------------------
// View lifecycle
// ---------------------------------------------------------------------------

/// Create a list view in its initial state (loading, no filters).
///
/// The caller must free the returned pointer with `character_view_free`.
#[unsafe(no_mangle)]
pub extern "C" fn character_view_new() -> *mut FfiCharacterView {
    catch_unwind(|| {
        Box::into_raw(Box::new(FfiCharacterView {
            inner: CharacterListView::new(),
        }))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a view created by `character_view_new`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn character_view_free(view: *mut FfiCharacterView) {
    if !view.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(view) });
        });
    }
}

/// Issue the initial load. Returns the request to execute, or null if an
/// argument is null.
#[unsafe(no_mangle)]
pub extern "C" fn character_view_mount(
    view: *mut FfiCharacterView,
    client: *const FfiCharacterClient,
) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if view.is_null() || client.is_null() {
            return std::ptr::null_mut();
        }
        let view = unsafe { &mut *view };
        let client = unsafe { &*client };
        let ticket = view.inner.mount();
        request_for_ticket(&mut view.inner, &client.inner, ticket)
    })
    .unwrap_or(std::ptr::null_mut())
}

#[unsafe(no_mangle)]
pub extern "C" fn character_view_open_gender_picker(view: *mut FfiCharacterView) {
    if !view.is_null() {
        let _ = catch_unwind(|| unsafe { &mut *view }.inner.open_gender_picker());
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn character_view_open_status_picker(view: *mut FfiCharacterView) {
    if !view.is_null() {
        let _ = catch_unwind(|| unsafe { &mut *view }.inner.open_status_picker());
    }
}

/// Apply a gender picker choice. Returns the request to execute when the
/// filter changed, otherwise null. Out-of-range codes are ignored.
#[unsafe(no_mangle)]
pub extern "C" fn character_view_choose_gender(
    view: *mut FfiCharacterView,
    client: *const FfiCharacterClient,
    choice: i32,
) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if view.is_null() || client.is_null() {
            return std::ptr::null_mut();
        }
        let view = unsafe { &mut *view };
        let client = unsafe { &*client };
        match decode_selection(choice).and_then(|s| view.inner.choose_gender(s)) {
            Some(ticket) => request_for_ticket(&mut view.inner, &client.inner, ticket),
            None => std::ptr::null_mut(),
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Apply a status picker choice. Returns the request to execute when the
/// filter changed, otherwise null. Out-of-range codes are ignored.
#[unsafe(no_mangle)]
pub extern "C" fn character_view_choose_status(
    view: *mut FfiCharacterView,
    client: *const FfiCharacterClient,
    choice: i32,
) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if view.is_null() || client.is_null() {
            return std::ptr::null_mut();
        }
        let view = unsafe { &mut *view };
        let client = unsafe { &*client };
        match decode_selection(choice).and_then(|s| view.inner.choose_status(s)) {
            Some(ticket) => request_for_ticket(&mut view.inner, &client.inner, ticket),
            None => std::ptr::null_mut(),
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Report the HTTP response for the request issued as `token`.
#[unsafe(no_mangle)]
pub extern "C" fn character_view_complete(
    view: *mut FfiCharacterView,
    client: *const FfiCharacterClient,
    token: u64,
    response: *const FfiHttpResponse,
) -> FfiFetchOutcome {
    catch_unwind(|| {
        if view.is_null() || client.is_null() || response.is_null() {
            return FfiFetchOutcome::NullArg;
        }
        let view = unsafe { &mut *view };
        let client = unsafe { &*client };
        let resp = unsafe { &*response };
        let result = ffi_response_to_core(resp).and_then(|r| client.inner.parse_fetch_characters(r));
        view.inner
            .finish_fetch(character_core::FetchToken::new(token), result)
            .into()
    })
    .unwrap_or(FfiFetchOutcome::Panic)
}

/// Report that the request issued as `token` never produced a response.
/// `message` may be null.
#[unsafe(no_mangle)]
pub extern "C" fn character_view_fail(
    view: *mut FfiCharacterView,
    token: u64,
    message: *const c_char,
) -> FfiFetchOutcome {
    catch_unwind(|| {
        if view.is_null() {
            return FfiFetchOutcome::NullArg;
        }
        let view = unsafe { &mut *view };
        let err = FetchError::Transport(read_c_str(message));
        view.inner
            .finish_fetch(character_core::FetchToken::new(token), Err(err))
            .into()
    })
    .unwrap_or(FfiFetchOutcome::Panic)
}

/// Copy out the current screen state. Returns null if `view` is null.
#[unsafe(no_mangle)]
pub extern "C" fn character_view_snapshot(view: *const FfiCharacterView) -> *mut FfiViewSnapshot {
    catch_unwind(|| {
        if view.is_null() {
            return std::ptr::null_mut();
        }
        let view = unsafe { &*view };
        FfiViewSnapshot::from_view(&view.inner)
    })
    .unwrap_or(std::ptr::null_mut())
}

// ---------------------------------------------------------------------------
// Pickers
// ---------------------------------------------------------------------------

/// Title and rows of a picker, in the order they are shown. Each row's
/// `code` is the value to pass to `character_view_choose_*`.
///
/// The caller must free the returned pointer with `character_free_picker`.
#[unsafe(no_mangle)]
pub extern "C" fn character_picker(kind: FfiFilterKind) -> *mut FfiPicker {
    catch_unwind(|| match kind {
        FfiFilterKind::Gender => FfiPicker::build::<GenderFilter>(CHARACTER_CHOICE_CANCEL),
        FfiFilterKind::Status => FfiPicker::build::<StatusFilter>(CHARACTER_CHOICE_CANCEL),
    })
    .unwrap_or(std::ptr::null_mut())
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free a picker returned by `character_picker`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn character_free_picker(picker: *mut FfiPicker) {
    if picker.is_null() {
        return;
    }
    let _ = catch_unwind(|| unsafe { FfiPicker::free(picker) });
}

/// Free a request returned by any build/mount/choose function. Safe to call
/// with null.
#[unsafe(no_mangle)]
pub extern "C" fn character_free_request(req: *mut FfiHttpRequest) {
    if req.is_null() {
        return;
    }
    let _ = catch_unwind(|| unsafe { FfiHttpRequest::free(req) });
}

/// Free a result returned by `character_parse_fetch_characters`. Safe to call
/// with null.
#[unsafe(no_mangle)]
pub extern "C" fn character_free_result(result: *mut FfiCharacterResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let result = unsafe { Box::from_raw(result) };
        free_c_string(result.error_message);
        unsafe { result.characters.free_items() };
    });
}

/// Free a snapshot returned by `character_view_snapshot`. Safe to call with
/// null.
#[unsafe(no_mangle)]
pub extern "C" fn character_free_snapshot(snapshot: *mut FfiViewSnapshot) {
    if snapshot.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let snapshot = unsafe { Box::from_raw(snapshot) };
        free_c_string(snapshot.gender_label);
        free_c_string(snapshot.status_label);
        unsafe { snapshot.characters.free_items() };
    });
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
