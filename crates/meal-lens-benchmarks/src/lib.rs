//! Lightweight NFR smoke bounds for the encode/digest loop; see `tests/`.
