mod vehicles;

pub use vehicles::Vehicles;
