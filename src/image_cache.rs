/// Image cache keyed by file path.
///
/// The cache is the sole owner of every decoded image. Callers receive a
/// copyable `ImageHandle`; unloading an image bumps the generation of its
/// slot, so stale handles resolve to `None` instead of dangling.

use std::collections::HashMap;
use std::ops::BitOr;
use std::path::{Path, PathBuf};

use crate::error::AssetError;

// ── Pixel formats & load flags ───────────────────────────────────────────────

/// Storage format an image is quantised to when it is loaded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum PixelFormat {
    /// 5 bits per colour channel, 1-bit alpha.
    #[default]
    Rgba5551,
    /// 4 bits per channel, including alpha.
    Rgba4444,
    /// Full 8 bits per channel.
    Rgba8888,
}

impl PixelFormat {
    pub fn quantize(self, [r, g, b, a]: [u8; 4]) -> [u8; 4] {
        match self {
            PixelFormat::Rgba5551 => [
                reduce(r, 5),
                reduce(g, 5),
                reduce(b, 5),
                if a >= 0x80 { 0xFF } else { 0 },
            ],
            PixelFormat::Rgba4444 => [reduce(r, 4), reduce(g, 4), reduce(b, 4), reduce(a, 4)],
            PixelFormat::Rgba8888 => [r, g, b, a],
        }
    }
}

/// Keep the top `bits` bits of `c` and replicate them into the low bits so
/// full intensity stays 0xFF.
fn reduce(c: u8, bits: u32) -> u8 {
    let v = c >> (8 - bits);
    (v << (8 - bits)) | (v >> (2 * bits - 8))
}

/// Options applied while decoding. Combine with `|`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct LoadFlags(u32);

impl LoadFlags {
    pub const NONE: LoadFlags = LoadFlags(0);
    /// Treat pure magenta (#FF00FF) as fully transparent.
    pub const COLOR_KEY: LoadFlags = LoadFlags(1);

    pub fn contains(self, other: LoadFlags) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn bits(self) -> u32 {
        self.0
    }
}

impl BitOr for LoadFlags {
    type Output = LoadFlags;

    fn bitor(self, rhs: LoadFlags) -> LoadFlags {
        LoadFlags(self.0 | rhs.0)
    }
}

const COLOR_KEY_RGB: [u8; 3] = [0xFF, 0x00, 0xFF];

// ── Decoded image ────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Image {
    pub width: u32,
    pub height: u32,
    pub format: PixelFormat,
    /// Row-major RGBA pixels, `width * height` long.
    pub pixels: Vec<[u8; 4]>,
}

impl Image {
    /// Build an image from raw RGBA pixels, applying `flags` and then
    /// quantising to `format`.
    pub fn from_rgba(
        width: u32,
        height: u32,
        pixels: Vec<[u8; 4]>,
        format: PixelFormat,
        flags: LoadFlags,
    ) -> Self {
        debug_assert_eq!(pixels.len(), (width * height) as usize);
        let color_key = flags.contains(LoadFlags::COLOR_KEY);
        let pixels = pixels
            .into_iter()
            .map(|px| {
                if color_key && px[..3] == COLOR_KEY_RGB {
                    [0, 0, 0, 0]
                } else {
                    format.quantize(px)
                }
            })
            .collect();
        Self {
            width,
            height,
            format,
            pixels,
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get((y * self.width + x) as usize).copied()
    }
}

// ── Loaders ──────────────────────────────────────────────────────────────────

/// Where the cache gets pixels from on a miss.
pub trait ImageLoader {
    fn load(&mut self, path: &str, format: PixelFormat, flags: LoadFlags)
        -> Result<Image, AssetError>;
}

/// Decodes PNG files found under a base directory.
#[derive(Clone, Debug)]
pub struct PngLoader {
    base_dir: PathBuf,
}

impl PngLoader {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }
}

impl ImageLoader for PngLoader {
    fn load(
        &mut self,
        path: &str,
        format: PixelFormat,
        flags: LoadFlags,
    ) -> Result<Image, AssetError> {
        let full = self.base_dir.join(path);
        let bytes = std::fs::read(&full).map_err(|source| AssetError::Io {
            path: full.clone(),
            source,
        })?;
        let decoded = image::load_from_memory_with_format(&bytes, image::ImageFormat::Png)
            .map_err(|source| AssetError::Decode {
                path: full.clone(),
                source,
            })?;

        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();
        if width == 0 || height == 0 {
            return Err(AssetError::Empty { path: full });
        }
        let pixels = rgba.pixels().map(|p| p.0).collect();
        Ok(Image::from_rgba(width, height, pixels, format, flags))
    }
}

// ── Cache ────────────────────────────────────────────────────────────────────

/// Reference to an image owned by an `ImageCache`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ImageHandle {
    slot: u32,
    generation: u32,
}

#[derive(Debug, Default)]
struct Slot {
    generation: u32,
    image: Option<Image>,
}

#[derive(Debug)]
pub struct ImageCache<L = PngLoader> {
    loader: L,
    /// `None` records a failed load so the file is not retried.
    entries: HashMap<String, Option<ImageHandle>>,
    slots: Vec<Slot>,
    free: Vec<u32>,
}

impl<L: ImageLoader> ImageCache<L> {
    pub fn new(loader: L) -> Self {
        Self {
            loader,
            entries: HashMap::new(),
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    /// Return the cached handle for `path`, loading it on first use.
    ///
    /// `format` and `flags` only matter on a miss. A load failure is logged
    /// and remembered: this call and every later one for the same path
    /// return `None` until the path is unloaded.
    pub fn load(&mut self, path: &str, format: PixelFormat, flags: LoadFlags) -> Option<ImageHandle> {
        if let Some(cached) = self.entries.get(path) {
            return *cached;
        }

        log::info!(
            "loading image '{}' (flags {:#x}, {:?})",
            path,
            flags.bits(),
            format
        );
        let handle = match self.loader.load(path, format, flags) {
            Ok(image) => Some(self.insert(image)),
            Err(err) => {
                log::warn!("could not load image '{}': {}", path, err);
                None
            }
        };
        self.entries.insert(path.to_string(), handle);
        handle
    }

    /// Like `load`, but failures are returned instead of cached.
    pub fn try_load(
        &mut self,
        path: &str,
        format: PixelFormat,
        flags: LoadFlags,
    ) -> Result<ImageHandle, AssetError> {
        if let Some(Some(handle)) = self.entries.get(path) {
            return Ok(*handle);
        }

        log::info!(
            "loading image '{}' (flags {:#x}, {:?})",
            path,
            flags.bits(),
            format
        );
        let image = self.loader.load(path, format, flags)?;
        let handle = self.insert(image);
        self.entries.insert(path.to_string(), Some(handle));
        Ok(handle)
    }

    pub fn get(&self, handle: ImageHandle) -> Option<&Image> {
        let slot = self.slots.get(handle.slot as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.image.as_ref()
    }

    /// Release the image loaded from `path`, if any.
    pub fn unload(&mut self, path: &str) {
        if let Some(entry) = self.entries.remove(path) {
            log::info!("unloading image '{}'", path);
            if let Some(handle) = entry {
                self.release(handle);
            }
        }
    }

    /// Release every image and forget every path.
    pub fn unload_all(&mut self) {
        log::info!("unloading all images, total: {}", self.entries.len());
        let entries: Vec<(String, Option<ImageHandle>)> = self.entries.drain().collect();
        for (path, entry) in entries {
            log::debug!("-> {}", path);
            if let Some(handle) = entry {
                self.release(handle);
            }
        }
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    /// Number of cached paths, failed loads included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }

    fn insert(&mut self, image: Image) -> ImageHandle {
        match self.free.pop() {
            Some(slot) => {
                let entry = &mut self.slots[slot as usize];
                entry.image = Some(image);
                ImageHandle {
                    slot,
                    generation: entry.generation,
                }
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    image: Some(image),
                });
                ImageHandle {
                    slot: (self.slots.len() - 1) as u32,
                    generation: 0,
                }
            }
        }
    }

    fn release(&mut self, handle: ImageHandle) {
        if let Some(slot) = self.slots.get_mut(handle.slot as usize) {
            if slot.generation == handle.generation && slot.image.is_some() {
                slot.image = None;
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(handle.slot);
            }
        }
    }
}
