qp_utils::module_index!(NodeID);
