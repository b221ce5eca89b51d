pub mod froidure_pin;
