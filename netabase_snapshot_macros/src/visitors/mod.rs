pub mod model_visitor;
