use qp_atom::{AtomId, gen_atoms, paste};

gen_atoms!(
    (IDENT_ARGUMENTS, "arguments"),
    (IDENT_BIND, "bind"),
    (IDENT_PUSH, "push"),
    (IDENT_UNDEFINED, "undefined"),
);
