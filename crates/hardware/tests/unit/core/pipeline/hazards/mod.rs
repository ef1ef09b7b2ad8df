/// RAW stalls and early result forwarding.
pub mod data_forwarding;
