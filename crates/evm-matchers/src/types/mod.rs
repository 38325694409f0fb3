pub(crate) mod bigint;
pub(crate) mod block;
pub(crate) mod receipt;
