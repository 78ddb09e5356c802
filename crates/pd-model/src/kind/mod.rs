mod op_kind;
pub use op_kind::OpKind;
