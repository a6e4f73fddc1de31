//! Frozen wire-contract fixtures for the analysis service; see `tests/`.
