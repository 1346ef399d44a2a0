pub(crate) mod edit;
pub(crate) mod print_set;
