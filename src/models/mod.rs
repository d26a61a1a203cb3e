pub mod gray_image;

pub use gray_image::GrayImage;
