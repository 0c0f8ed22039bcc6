//! Planner operations on [`ResizePlan`].
//!
//! Every operation re-derives its rectangles from the original dimensions,
//! so chained calls never accumulate: `resize_to_width(400)` followed by
//! `resize_to_height(300)` leaves exactly the second plan behind.

use super::{CropAnchor, Rect, ResizePlan};

impl ResizePlan {
    fn original_w(&self) -> f64 {
        self.original_width as f64
    }

    fn original_h(&self) -> f64 {
        self.original_height as f64
    }

    /// Stretch the whole image to `width` x `height`.
    ///
    /// When enlargement is not allowed and either dimension exceeds the
    /// original, the request is replaced by the original dimensions. This
    /// is not reported as an error.
    pub fn resize(
        &mut self,
        width: impl Into<f64>,
        height: impl Into<f64>,
        allow_enlarge: bool,
    ) -> &mut Self {
        let mut width = width.into();
        let mut height = height.into();

        if !allow_enlarge && (width > self.original_w() || height > self.original_h()) {
            log::trace!(
                "Enlargement to {}x{} not allowed, keeping {}x{}",
                width,
                height,
                self.original_width,
                self.original_height
            );
            width = self.original_w();
            height = self.original_h();
        }

        self.source = Rect::sized(self.original_w(), self.original_h());
        self.dest = Rect::sized(width, height);
        self
    }

    /// Resize to `width`, deriving the height from the original aspect ratio.
    pub fn resize_to_width(&mut self, width: impl Into<f64>, allow_enlarge: bool) -> &mut Self {
        let width = width.into();
        let height = width * self.original_h() / self.original_w();
        self.resize(width, height, allow_enlarge)
    }

    /// Resize to `height`, deriving the width from the original aspect ratio.
    pub fn resize_to_height(&mut self, height: impl Into<f64>, allow_enlarge: bool) -> &mut Self {
        let height = height.into();
        let width = height * self.original_w() / self.original_h();
        self.resize(width, height, allow_enlarge)
    }

    /// Resize so the shorter original side becomes `max_short`.
    ///
    /// Square images treat the width as the short side.
    pub fn resize_to_short_side(
        &mut self,
        max_short: impl Into<f64>,
        allow_enlarge: bool,
    ) -> &mut Self {
        let max_short = max_short.into();
        if self.original_height < self.original_width {
            let long = self.original_w() * (max_short / self.original_h());
            self.resize(long, max_short, allow_enlarge)
        } else {
            let long = self.original_h() * (max_short / self.original_w());
            self.resize(max_short, long, allow_enlarge)
        }
    }

    /// Resize so the longer original side becomes `max_long`.
    ///
    /// Square images treat the width as the long side.
    pub fn resize_to_long_side(
        &mut self,
        max_long: impl Into<f64>,
        allow_enlarge: bool,
    ) -> &mut Self {
        let max_long = max_long.into();
        if self.original_height > self.original_width {
            let short = self.original_w() * (max_long / self.original_h());
            self.resize(short, max_long, allow_enlarge)
        } else {
            let short = self.original_h() * (max_long / self.original_w());
            self.resize(max_long, short, allow_enlarge)
        }
    }

    /// Fit the image inside `max_width` x `max_height`, keeping its aspect ratio.
    ///
    /// If the original already fits and enlargement is not allowed, the
    /// current plan is left untouched.
    pub fn resize_to_best_fit(
        &mut self,
        max_width: impl Into<f64>,
        max_height: impl Into<f64>,
        allow_enlarge: bool,
    ) -> &mut Self {
        let max_width = max_width.into();
        let max_height = max_height.into();

        if self.original_w() <= max_width && self.original_h() <= max_height && !allow_enlarge {
            return self;
        }

        let ratio = self.original_h() / self.original_w();
        let mut width = max_width;
        let mut height = width * ratio;

        if height > max_height {
            height = max_height;
            width = (height / ratio).round();
        }

        self.resize(width, height, allow_enlarge)
    }

    /// Scale both original dimensions by `percent` / 100. Enlargement is always allowed.
    pub fn scale(&mut self, percent: impl Into<f64>) -> &mut Self {
        let percent = percent.into();
        if percent == 100.0 {
            return self;
        }

        let width = self.original_w() * percent / 100.0;
        let height = self.original_h() * percent / 100.0;
        self.resize(width, height, true)
    }

    /// Crop to exactly `width` x `height`, trimming the excess axis at `anchor`.
    ///
    /// Without enlargement each requested dimension is clamped to the
    /// original independently.
    pub fn crop(
        &mut self,
        width: impl Into<f64>,
        height: impl Into<f64>,
        allow_enlarge: bool,
        anchor: CropAnchor,
    ) -> &mut Self {
        let mut width = width.into();
        let mut height = height.into();

        if !allow_enlarge {
            width = width.min(self.original_w());
            height = height.min(self.original_h());
        }

        let ratio_source = self.original_w() / self.original_h();
        let ratio_dest = width / height;

        if ratio_dest < ratio_source {
            self.resize_to_height(height, allow_enlarge);

            let excess_width = (self.dest.width - width) / self.dest.width * self.original_w();
            self.source.width = self.original_w() - excess_width;
            self.source.x = anchor.offset(excess_width);
            self.dest.width = width;
        } else {
            self.resize_to_width(width, allow_enlarge);

            let excess_height = (self.dest.height - height) / self.dest.height * self.original_h();
            self.source.height = self.original_h() - excess_height;
            self.source.y = anchor.offset(excess_height);
            self.dest.height = height;
        }

        self
    }

    /// Crop a `width` x `height` window at `(x, y)` without resizing.
    ///
    /// If either offset is missing this is a centered [`crop`](Self::crop).
    /// The source window is clamped to the image, but the destination keeps
    /// the requested size, so a window hanging over an edge is stretched.
    pub fn freecrop(
        &mut self,
        width: impl Into<f64>,
        height: impl Into<f64>,
        x: Option<f64>,
        y: Option<f64>,
    ) -> &mut Self {
        let width = width.into();
        let height = height.into();

        let (Some(x), Some(y)) = (x, y) else {
            return self.crop(width, height, false, CropAnchor::Center);
        };

        self.source = Rect::new(
            x,
            y,
            width.min(self.original_w() - x),
            height.min(self.original_h() - y),
        );
        self.dest = Rect::sized(width, height);
        self
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
