pub(crate) mod hasr_rows;
