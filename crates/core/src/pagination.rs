//! Cursor-based pagination shared by every listable entity.
//!
//! # Cursor tokens
//!
//! A cursor is an opaque, URL-safe string encoding the `created_at` boundary
//! of the last row a client has seen. Internally it is unpadded URL-safe
//! base64 over a fixed 12-byte big-endian record: whole seconds since the Unix
//! epoch (`i64`) followed by the sub-second nanoseconds (`u32`). The empty
//! string is the "start from the beginning" cursor and decodes to the epoch.
//!
//! # Protocol
//!
//! A page query selects rows with `created_at > decode(cursor)` that are not
//! soft-deleted, ordered by `created_at` ascending, capped at `limit`. If the
//! page is full, the next cursor encodes the last row's `created_at`;
//! otherwise it is empty, which marks the end of data. A full final page is
//! therefore always followed by one empty page.

use std::num::NonZeroU32;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

const TOKEN_BYTES: usize = 12;

/// Midnight UTC, 24 November 4714 BC: the earliest instant a `PostgreSQL`
/// `timestamptz` holds. Its upper bound lies beyond what `chrono` represents.
const EARLIEST_STORABLE_SECS: i64 = -210_866_803_200;

/// A malformed, non-empty cursor token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CursorError {
    #[error("cursor is not valid base64: {0}")]
    Encoding(#[from] base64::DecodeError),
    #[error("cursor has {0} bytes, expected {TOKEN_BYTES}")]
    Length(usize),
    #[error("cursor does not encode a storable instant")]
    OutOfRange,
}

/// An invalid page request from the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PageRequestError {
    #[error("limit must be a positive integer (got {0})")]
    InvalidLimit(i64),
}

/// Encode a `created_at` boundary as an opaque cursor token.
#[must_use]
pub fn encode_cursor(boundary: DateTime<Utc>) -> String {
    let mut bytes = [0_u8; TOKEN_BYTES];
    let (secs, nanos) = bytes.split_at_mut(8);
    secs.copy_from_slice(&boundary.timestamp().to_be_bytes());
    nanos.copy_from_slice(&boundary.timestamp_subsec_nanos().to_be_bytes());
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Decode a cursor token into its `created_at` boundary.
///
/// The empty token decodes to the Unix epoch, the start of every
/// listing.
///
/// # Errors
///
/// Returns `CursorError` if a non-empty token is not one this codec produced,
/// or encodes an instant earlier than the datastore can compare against.
pub fn decode_cursor(token: &str) -> Result<DateTime<Utc>, CursorError> {
    if token.is_empty() {
        return Ok(DateTime::<Utc>::UNIX_EPOCH);
    }

    let bytes = URL_SAFE_NO_PAD.decode(token)?;
    let record: [u8; TOKEN_BYTES] = bytes
        .as_slice()
        .try_into()
        .map_err(|_| CursorError::Length(bytes.len()))?;
    let (secs, nanos) = record.split_at(8);

    let secs = i64::from_be_bytes(secs.try_into().map_err(|_| CursorError::OutOfRange)?);
    let nanos = u32::from_be_bytes(nanos.try_into().map_err(|_| CursorError::OutOfRange)?);

    if secs < EARLIEST_STORABLE_SECS {
        return Err(CursorError::OutOfRange);
    }
    DateTime::from_timestamp(secs, nanos).ok_or(CursorError::OutOfRange)
}

/// A validated request for one page of a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    limit: NonZeroU32,
    cursor: String,
}

impl PageRequest {
    /// Build a page request from raw caller input.
    ///
    /// There is no implicit default limit; the caller must supply one.
    ///
    /// # Errors
    ///
    /// Returns `PageRequestError::InvalidLimit` if `limit` is zero, negative,
    /// or larger than `u32::MAX`.
    pub fn new(limit: i64, cursor: impl Into<String>) -> Result<Self, PageRequestError> {
        let limit = u32::try_from(limit)
            .ok()
            .and_then(NonZeroU32::new)
            .ok_or(PageRequestError::InvalidLimit(limit))?;

        Ok(Self {
            limit,
            cursor: cursor.into(),
        })
    }

    /// A request for the first page.
    #[must_use]
    pub const fn first(limit: NonZeroU32) -> Self {
        Self {
            limit,
            cursor: String::new(),
        }
    }

    /// The maximum number of rows in the page.
    #[must_use]
    pub const fn limit(&self) -> NonZeroU32 {
        self.limit
    }

    /// The raw cursor token (empty for the first page).
    #[must_use]
    pub fn cursor(&self) -> &str {
        &self.cursor
    }

    /// Decode the cursor into the exclusive `created_at` lower bound.
    ///
    /// # Errors
    ///
    /// Returns `CursorError` if the cursor is malformed.
    pub fn boundary(&self) -> Result<DateTime<Utc>, CursorError> {
        decode_cursor(&self.cursor)
    }

    /// The request for the page following `page`, or `None` at end of data.
    #[must_use]
    pub fn next<T>(&self, page: &Page<T>) -> Option<Self> {
        if page.next_cursor.is_empty() {
            return None;
        }

        Some(Self {
            limit: self.limit,
            cursor: page.next_cursor.clone(),
        })
    }
}

/// One page of a cursor-paginated listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    /// Rows in ascending `created_at` order.
    pub items: Vec<T>,
    /// Cursor for the next page; empty once the end of data is reached.
    pub next_cursor: String,
}

impl<T> Page<T> {
    /// Assemble a page from rows fetched with `LIMIT limit`.
    ///
    /// `created_at` extracts the pagination key from a row.
    #[must_use]
    pub fn from_rows(
        items: Vec<T>,
        limit: NonZeroU32,
        created_at: impl Fn(&T) -> DateTime<Utc>,
    ) -> Self {
        let full = u32::try_from(items.len()).is_ok_and(|len| len == limit.get());

        let next_cursor = match items.last() {
            Some(last) if full => encode_cursor(created_at(last)),
            _ => String::new(),
        };

        Self { items, next_cursor }
    }

    /// An empty, final page.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            items: Vec::new(),
            next_cursor: String::new(),
        }
    }

    /// Number of rows in this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether this page has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether this is the final page.
    #[must_use]
    pub fn is_last(&self) -> bool {
        self.next_cursor.is_empty()
    }

    /// Map every row, keeping the cursor.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            next_cursor: self.next_cursor,
        }
    }
}
