use std::sync::Arc;

use crate::{
    assets::decode::PreparedImage,
    foundation::{
        core::{Affine, Canvas, Rgba8},
        error::{ArtError, ArtResult},
    },
    layout::{
        plan::{FontRole, TextDraw, TextPlan},
        straight::TextAlign,
    },
    render::{
        shadow::{ShadowStyle, blur_inked_region_in_place, over_in_place},
        surface::{Surface, canvas_dims_u16},
    },
    style::model::StyleConfig,
    text::{engine::TextShaper, fonts::FontSet},
};

/// Draws background, shadow and text onto a [`Surface`].
///
/// Holds the two font shapers and scratch layers between renders; nothing about the previous
/// composition leaks into the next one.
pub struct Compositor {
    title: TextShaper,
    artist: TextShaper,
    shadow: ShadowStyle,
    background: Option<(Arc<Vec<u8>>, vello_cpu::Image)>,
    layers: Option<Layers>,
}

struct Layers {
    canvas: Canvas,
    shadow: vello_cpu::Pixmap,
    text: vello_cpu::Pixmap,
}

impl Compositor {
    pub fn new(fonts: &FontSet) -> ArtResult<Self> {
        Ok(Self {
            title: TextShaper::for_role(fonts, FontRole::Title)?,
            artist: TextShaper::for_role(fonts, FontRole::Artist)?,
            shadow: ShadowStyle::default(),
            background: None,
            layers: None,
        })
    }

    /// Family names of the title and artist faces.
    pub fn families(&self) -> (&str, &str) {
        (self.title.family(), self.artist.family())
    }

    /// Fully redraw `surface`: the image stretched to the canvas, then the title and artist
    /// text with a blurred drop shadow.
    #[tracing::instrument(
        level = "debug",
        skip(self, surface, image, style),
        fields(layout = %style.text_layout, position = %style.text_position)
    )]
    pub fn render(
        &mut self,
        surface: &mut Surface,
        image: &PreparedImage,
        title: &str,
        artist: &str,
        style: &StyleConfig,
    ) -> ArtResult<()> {
        style.validate()?;
        let canvas = surface.canvas();
        let (w, h) = canvas_dims_u16(canvas)?;
        let plan = TextPlan::build(canvas, title, artist, style);
        let color = style.text_color.rgba8();

        // Everything that can fail runs before the surface is touched, so a failed render
        // leaves the previous frame in place.
        let background = self.background_paint(image)?;
        let layers = if plan.is_empty() {
            None
        } else {
            let mut layers = match self.layers.take() {
                Some(layers) if layers.canvas == canvas => layers,
                _ => Layers {
                    canvas,
                    shadow: vello_cpu::Pixmap::new(w, h),
                    text: vello_cpu::Pixmap::new(w, h),
                },
            };
            match self.draw_text_layers(&mut layers, &plan, color, (w, h)) {
                Ok(()) => Some(layers),
                Err(err) => {
                    self.layers = Some(layers);
                    return Err(err);
                }
            }
        };

        surface.clear();
        let mut ctx = vello_cpu::RenderContext::new(w, h);
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_transform(affine_to_cpu(Affine::scale_non_uniform(
            f64::from(canvas.width) / f64::from(image.width),
            f64::from(canvas.height) / f64::from(image.height),
        )));
        ctx.set_paint(background);
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(image.width),
            f64::from(image.height),
        ));
        ctx.flush();
        ctx.render_to_pixmap(surface.pixmap_mut());

        if let Some(layers) = layers {
            let result = over_in_place(surface.data_mut(), layers.shadow.data_as_u8_slice())
                .and_then(|()| over_in_place(surface.data_mut(), layers.text.data_as_u8_slice()));
            self.layers = Some(layers);
            result?;
        }

        surface.mark_drawn();
        tracing::debug!(draws = plan.draws.len(), "composition rendered");
        Ok(())
    }

    fn draw_text_layers(
        &mut self,
        layers: &mut Layers,
        plan: &TextPlan,
        color: Rgba8,
        (w, h): (u16, u16),
    ) -> ArtResult<()> {
        layers.shadow.data_as_u8_slice_mut().fill(0);
        layers.text.data_as_u8_slice_mut().fill(0);

        if self.shadow.is_visible() && color.a > 0 {
            let mut ctx = vello_cpu::RenderContext::new(w, h);
            self.fill_plan(&mut ctx, plan, self.shadow.paint_for(color))?;
            ctx.flush();
            ctx.render_to_pixmap(&mut layers.shadow);
            blur_inked_region_in_place(
                layers.shadow.data_as_u8_slice_mut(),
                u32::from(w),
                u32::from(h),
                self.shadow.radius(),
                self.shadow.sigma(),
            )?;
        }

        let mut ctx = vello_cpu::RenderContext::new(w, h);
        self.fill_plan(&mut ctx, plan, color)?;
        ctx.flush();
        ctx.render_to_pixmap(&mut layers.text);
        Ok(())
    }

    fn fill_plan(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        plan: &TextPlan,
        paint: Rgba8,
    ) -> ArtResult<()> {
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            paint.r, paint.g, paint.b, paint.a,
        ));
        for draw in &plan.draws {
            self.fill_draw(ctx, draw)?;
        }
        Ok(())
    }

    fn fill_draw(&mut self, ctx: &mut vello_cpu::RenderContext, draw: &TextDraw) -> ArtResult<()> {
        let shaper = match draw.role {
            FontRole::Title => &mut self.title,
            FontRole::Artist => &mut self.artist,
        };
        let line = shaper.shape(&draw.text, draw.font_size)?;
        if line.glyphs.is_empty() {
            return Ok(());
        }

        let dx = match draw.align {
            TextAlign::Left => 0.0,
            TextAlign::Center => -line.advance / 2.0,
            TextAlign::Right => -line.advance,
        };
        let x0 = draw.origin.x as f32 + dx;
        let baseline = draw.origin.y as f32 + line.middle_to_baseline();

        ctx.set_transform(affine_to_cpu(draw.transform));
        for run in &line.runs {
            let glyphs = line.glyphs[run.glyphs.clone()]
                .iter()
                .map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: x0 + g.x,
                    y: baseline + g.y,
                });
            ctx.glyph_run(&run.font)
                .font_size(line.font_size)
                .normalized_coords(&run.coords)
                .fill_glyphs(glyphs);
        }
        Ok(())
    }

    fn background_paint(&mut self, image: &PreparedImage) -> ArtResult<vello_cpu::Image> {
        if let Some((bytes, paint)) = &self.background
            && Arc::ptr_eq(bytes, &image.rgba8_premul)
        {
            return Ok(paint.clone());
        }

        let pixmap = image_premul_bytes_to_pixmap(&image.rgba8_premul, image.width, image.height)?;
        let paint = vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        };
        self.background = Some((image.rgba8_premul.clone(), paint.clone()));
        Ok(paint)
    }
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn image_premul_bytes_to_pixmap(
    rgba8_premul: &[u8],
    width: u32,
    height: u32,
) -> ArtResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| ArtError::render("image width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| ArtError::render("image height exceeds u16"))?;
    if w == 0 || h == 0 {
        return Err(ArtError::render("background image is empty"));
    }
    if rgba8_premul.len() != width as usize * height as usize * 4 {
        return Err(ArtError::render("prepared image byte length mismatch"));
    }

    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for px in rgba8_premul.chunks_exact(4) {
        let a = px[3];
        may_have_opacities |= a != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a,
        });
    }

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
