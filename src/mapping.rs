mod mapper;


pub use mapper::{Addressing, CoordinateMapper};
