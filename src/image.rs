mod load;
mod texture;

pub use load::decode_image_from_path;
pub use texture::LoadedImage;
