#![forbid(unsafe_code)]

pub mod animation;
pub mod config;
pub mod contact;
pub mod foundation;
pub mod i18n;
pub mod mail;
pub mod parallax;
pub mod particles;
pub mod server;

pub use animation::{
    ease::Ease,
    frame::{AnimationLoop, FrameOutcome, FrameTask},
    signals::{InputReader, InputSignals, InputSnapshot, Visibility},
    spring::Spring,
};
pub use config::SiteConfig;
pub use contact::{
    form::{ContactForm, Field, FormPhase},
    transport::{ContactTransport, HttpContactClient, SubmissionResult},
};
pub use foundation::{
    core::{Canvas, Fps, Point, Vec2, Viewport},
    error::{SiteError, SiteResult},
    math::Rng64,
};
pub use i18n::{
    locale::{LanguageTransition, Locale},
    preference::{FileStore, MemoryStore, PreferenceStore},
    table::{Language, TranslationTable},
};
pub use mail::{
    dispatch::{DispatchError, DispatchReceipt, Dispatcher},
    payload::ContactPayload,
    provider::{MailProvider, ResendProvider},
};
pub use parallax::{
    cursor::CursorFollower,
    layer::{ParallaxConfig, ParallaxLayer},
    scroll::{ElementMetrics, ScrollTrack},
};
pub use particles::{
    cpu::CpuSurface,
    driver::{CanvasFit, ParticleLoop, ParticleScene},
    field::{ParticleConfig, ParticleField},
    surface::ParticleSurface,
};
