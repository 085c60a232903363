//! Workspace tooling package. The library lives in `crates/airnav-lib` and the
//! command-line front end in `crates/airnav-cli`.
