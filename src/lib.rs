//! Photobooth is a four-shot photo booth pipeline.
//!
//! A session runs in three stages:
//!
//! - Capture four photos with a [`CaptureSequencer`] (countdown state machine over a [`Camera`])
//! - Edit each one in an [`EditSession`]: pick a [`BorderStyle`] and a [`FilterSpec`], and the
//!   [`Compositor`] renders an 800×600 [`FinalPhoto`]
//! - Hand the resulting [`PrintSet`] to a [`LayoutPresenter`] for printing, bulk download, or
//!   copying the first photo to a clipboard
//!
//! Rendering runs on the CPU through `vello_cpu`; borders are generated procedurally.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod foundation;

pub(crate) mod border;
pub(crate) mod capture;
pub(crate) mod effects;
pub(crate) mod layout;
pub(crate) mod render;
pub(crate) mod session;

pub use crate::foundation::core::{BezPath, Canvas, InsetRect, Point, Rect, Rgba8};
pub use crate::foundation::error::{PhotoboothError, PhotoboothResult};
pub use crate::foundation::settings::{
    BoothSettings, CaptureSettings, ComposeSettings, FacingMode, StreamConstraints,
};

pub use crate::assets::decode::{
    JPEG_MIME, RawPhoto, decode_data_uri, decode_rgba, encode_jpeg, to_data_uri,
};
pub use crate::border::generate::{
    BorderLayout, BorderMotifs, BorderStyle, DEFAULT_BORDER_INSET, FLOWER_CENTER, FLOWER_PURPLE,
    HEART_PINK, PerimeterTiling, RAINBOW, RainbowBands, STAR_AMBER, TiledMotifs, generate,
    generate_border,
};
pub use crate::border::shapes::{
    BandEdge, DrawPrimitive, FlowerMotif, HeartMotif, MotifShape, ShapeFill, StarMotif,
    circle_path, heart_path, star_path,
};
pub use crate::capture::camera::{Camera, StillCamera};
pub use crate::capture::sequencer::{CaptureSequencer, CaptureState, TickOutcome};
pub use crate::effects::filter::{ColorOp, ColorTransformSpec, FilterSpec, resolve_filter};
pub use crate::layout::export::{
    Clipboard, DirectorySink, DownloadSink, HtmlFilePrintSurface, MemoryClipboard, Notice,
    NoticeKind, PrintOutcome, PrintSurface,
};
pub use crate::layout::presenter::{GRID_COLUMNS, GRID_ROWS, LayoutPresenter, download_file_name};
pub use crate::render::compositor::{CompositionRequest, Compositor, FinalPhoto};
pub use crate::render::cpu::CpuCanvas;
pub use crate::session::edit::EditSession;
pub use crate::session::print_set::{PRINT_SET_LEN, PrintSet, PrintSetBuilder};
