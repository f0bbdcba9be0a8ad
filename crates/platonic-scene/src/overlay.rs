//! 2D overlay drawn over the scene.
//!
//! [`Overlay::derive`] is a pure function of the scene state giving the
//! values every layer settles on. [`Crossfade`] eases the on-screen values
//! toward them with per-layer durations.

use platonic_core::{Element, Rgb, SceneState, palette};

/// Finale greeting.
pub const TITLE: &str = "FROHE WEIHNACHTEN";
pub const SUBTITLE: &str = "und einen guten Rutsch";
/// Footer line above the logo.
pub const FOOTER: &str = "CardinalContor.com";

/// Warm tint standing in for the finale background image.
pub const FINALE_TINT: Rgb = Rgb::from_hex(0x3a1a10);

/// Opacity of the hovered element's background layer.
pub const LAYER_OPACITY: f32 = 0.3;
/// Zoom of the hovered element's background layer.
pub const LAYER_ZOOM: f32 = 1.05;
/// Opacity of the darkening layer over the finale background.
pub const DARKEN_OPACITY: f32 = 0.4;
/// How far the title rises in the finale, as a fraction of the height.
pub const TITLE_LIFT: f32 = 0.1;
/// Rows the footer sits below its final position before the finale.
pub const FOOTER_DROP: f32 = 4.0;

const LAYER_FADE_SECS: f32 = 1.5;
const FINALE_FADE_SECS: f32 = 3.0;
const TEXT_FADE_SECS: f32 = 4.0;
const FOOTER_DELAY_SECS: f32 = 2.0;
const PAGE_FADE_SECS: f32 = 1.0;

/// One element's background image layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layer {
    pub element: Element,
    pub opacity: f32,
    pub scale: f32,
}

impl Layer {
    /// Image the layer shows.
    pub fn url(&self) -> Option<&'static str> {
        self.element.background_url()
    }
}

/// Opacity and vertical offset of a text block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Caption {
    pub opacity: f32,
    pub offset: f32,
}

/// Values of every overlay layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Overlay {
    pub layers: [Layer; 4],
    /// Finale background image.
    pub finale_opacity: f32,
    /// Black layer over the finale background.
    pub darken_opacity: f32,
    /// Greeting; offset is a fraction of the height, negative is up.
    pub title: Caption,
    /// Site name and logo; offset is in rows, positive is down.
    pub footer: Caption,
    /// Page background behind everything.
    pub page: Rgb,
}

/// Opacity of `element`'s background layer in `state`.
pub fn background_opacity(element: Element, state: &SceneState) -> f32 {
    if state.is_active(element) && !state.is_finale() {
        LAYER_OPACITY
    } else {
        0.0
    }
}

impl Overlay {
    /// Settled overlay values for `state`.
    pub fn derive(state: &SceneState) -> Self {
        let finale = state.is_finale();
        let on = |flag: bool| if flag { 1.0 } else { 0.0 };

        let layers = Element::BACKDROPS.map(|element| {
            let opacity = background_opacity(element, state);
            Layer {
                element,
                opacity,
                scale: if opacity > 0.0 { LAYER_ZOOM } else { 1.0 },
            }
        });

        Self {
            layers,
            finale_opacity: on(finale),
            darken_opacity: on(finale) * DARKEN_OPACITY,
            title: Caption {
                opacity: on(finale),
                offset: -TITLE_LIFT * on(finale),
            },
            footer: Caption {
                opacity: on(finale),
                offset: if finale { 0.0 } else { FOOTER_DROP },
            },
            page: if finale {
                palette::FINALE_BG
            } else {
                palette::BLACK
            },
        }
    }
}

/// Ease `value` toward `target` so it is ~98% there after `duration`.
fn approach(value: f32, target: f32, dt: f32, duration: f32) -> f32 {
    let k = 1.0 - (-4.0 * dt / duration).exp();
    value + (target - value) * k
}

/// On-screen overlay values easing toward their targets.
#[derive(Debug, Clone)]
pub struct Crossfade {
    current: Overlay,
    /// Seconds the footer has been waiting to fade in.
    footer_wait: f32,
}

impl Crossfade {
    /// Start settled on `initial`.
    pub fn new(initial: Overlay) -> Self {
        Self {
            current: initial,
            footer_wait: 0.0,
        }
    }

    pub fn current(&self) -> &Overlay {
        &self.current
    }

    /// Move the on-screen values `dt` seconds toward `target`.
    pub fn advance(&mut self, target: &Overlay, dt: f32) {
        let current = &mut self.current;

        for (layer, goal) in current.layers.iter_mut().zip(&target.layers) {
            layer.opacity = approach(layer.opacity, goal.opacity, dt, LAYER_FADE_SECS);
            layer.scale = approach(layer.scale, goal.scale, dt, LAYER_FADE_SECS);
        }

        current.finale_opacity =
            approach(current.finale_opacity, target.finale_opacity, dt, FINALE_FADE_SECS);
        current.darken_opacity =
            approach(current.darken_opacity, target.darken_opacity, dt, FINALE_FADE_SECS);

        current.title.opacity =
            approach(current.title.opacity, target.title.opacity, dt, TEXT_FADE_SECS);
        current.title.offset =
            approach(current.title.offset, target.title.offset, dt, TEXT_FADE_SECS);

        if target.footer != current.footer {
            self.footer_wait += dt;
        } else {
            self.footer_wait = 0.0;
        }
        let footer_dt = (self.footer_wait - FOOTER_DELAY_SECS).clamp(0.0, dt);
        current.footer.opacity =
            approach(current.footer.opacity, target.footer.opacity, footer_dt, TEXT_FADE_SECS);
        current.footer.offset =
            approach(current.footer.offset, target.footer.offset, footer_dt, TEXT_FADE_SECS);

        let k = 1.0 - (-4.0 * dt / PAGE_FADE_SECS).exp();
        current.page = current.page.lerp(target.page, k);
    }
}
