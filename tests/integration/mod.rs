//! Integration tests driving the readiness-gate binary

mod helpers;
mod test_gate;
mod test_list;
