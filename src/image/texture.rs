use egui::{ColorImage, Context, TextureHandle, TextureOptions, Vec2};

/// A decoded image uploaded to the GPU.
pub struct LoadedImage {
    pub size: [usize; 2],
    pub texture: TextureHandle,
}

impl LoadedImage {
    pub fn from_color_image(ctx: &Context, pixels: ColorImage) -> Self {
        let size = pixels.size;
        let texture = ctx.load_texture("loaded_image", pixels, TextureOptions::LINEAR);
        Self { size, texture }
    }

    pub fn size_vec2(&self) -> Vec2 {
        Vec2::new(
            crate::util::safe_usize_to_f32(self.size[0]),
            crate::util::safe_usize_to_f32(self.size[1]),
        )
    }
}
