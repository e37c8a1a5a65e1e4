//! CRT timing from a resolution and refresh rate.
//!
//! Implements the VESA Generalized Timing Formula, plus a reduced-blanking
//! variant for flat panels. The result is a [`Modeline`], the only input the
//! register programming stages take.
//!
//! Everything here is pure and deterministic: the same request always yields
//! the same modeline, down to the rounded pixel clock. The controller gives
//! no feedback about the clock it actually locked to, so there is nothing to
//! correct a drifting result against later.

use core::fmt;

use bitflags::bitflags;

use crate::error::VideoError;
use crate::request::{MAX_DIMENSION, MAX_REFRESH_HZ};

/// Horizontal character cell granularity of the controller, in pixels.
/// Every horizontal timing value is a multiple of this.
pub const CHARACTER_CELL: u32 = 8;

/// Blanking duty cycle never drops below this percentage.
const MIN_DUTY_CYCLE: f64 = 20.0;

bitflags! {
    /// Scan and sync polarity flags of a modeline.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ModeFlags: u8 {
        const INTERLACE      = 1 << 0;
        const DOUBLE_SCAN    = 1 << 1;
        /// Horizontal sync is active low.
        const HSYNC_NEGATIVE = 1 << 2;
        /// Vertical sync is active low.
        const VSYNC_NEGATIVE = 1 << 3;
    }
}

/// One axis of a modeline: active area, sync pulse and total, in pixels
/// (horizontal) or lines (vertical).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncTiming {
    pub display: u32,
    pub sync_start: u32,
    pub sync_end: u32,
    pub total: u32,
}

impl SyncTiming {
    #[inline]
    fn is_ordered(&self) -> bool {
        self.display <= self.sync_start && self.sync_start <= self.sync_end && self.sync_end <= self.total
    }

    #[inline]
    fn is_well_formed(&self) -> bool {
        self.display > 0 && self.total > self.display && self.is_ordered()
    }

    /// Length of the sync pulse.
    #[inline]
    pub const fn sync_width(&self) -> u32 {
        self.sync_end - self.sync_start
    }

    /// Blanking before the active area when it is centred in the total.
    /// An odd remainder goes to the blanking after the active area.
    #[inline]
    pub const fn leading_margin(&self) -> u32 {
        (self.total - self.display) / 2
    }
}

/// A complete CRT timing descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Modeline {
    pixel_clock_mhz: u32,
    horizontal: SyncTiming,
    vertical: SyncTiming,
    flags: ModeFlags,
}

impl Modeline {
    /// Build a modeline, checking that both axes are ordered
    /// (display <= sync start <= sync end <= total), that each has a
    /// non-empty active area with blanking after it, and that the clock is
    /// non-zero.
    pub fn new(
        pixel_clock_mhz: u32,
        horizontal: SyncTiming,
        vertical: SyncTiming,
        flags: ModeFlags,
    ) -> Result<Self, VideoError> {
        if pixel_clock_mhz == 0 || !horizontal.is_well_formed() || !vertical.is_well_formed() {
            return Err(VideoError::InvalidModeline);
        }
        Ok(Self {
            pixel_clock_mhz,
            horizontal,
            vertical,
            flags,
        })
    }

    #[inline]
    pub const fn pixel_clock_mhz(&self) -> u32 {
        self.pixel_clock_mhz
    }

    #[inline]
    pub const fn horizontal(&self) -> SyncTiming {
        self.horizontal
    }

    #[inline]
    pub const fn vertical(&self) -> SyncTiming {
        self.vertical
    }

    #[inline]
    pub const fn flags(&self) -> ModeFlags {
        self.flags
    }

    /// Vertical refresh produced by the quantised pixel clock, rounded to Hz.
    pub fn refresh_hz(&self) -> u32 {
        let pixels = self.horizontal.total as u64 * self.vertical.total as u64;
        ((self.pixel_clock_mhz as u64 * 1_000_000 + pixels / 2) / pixels) as u32
    }
}

/// X11 `Modeline` syntax.
impl fmt::Display for Modeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let h = &self.horizontal;
        let v = &self.vertical;
        write!(
            f,
            "Modeline \"{}x{}\" {} {} {} {} {} {} {} {} {}",
            h.display,
            v.display,
            self.pixel_clock_mhz,
            h.display,
            h.sync_start,
            h.sync_end,
            h.total,
            v.display,
            v.sync_start,
            v.sync_end,
            v.total
        )?;
        let polarity = |negative: bool| if negative { '-' } else { '+' };
        write!(
            f,
            " {}hsync {}vsync",
            polarity(self.flags.contains(ModeFlags::HSYNC_NEGATIVE)),
            polarity(self.flags.contains(ModeFlags::VSYNC_NEGATIVE))
        )?;
        if self.flags.contains(ModeFlags::INTERLACE) {
            f.write_str(" interlace")?;
        }
        if self.flags.contains(ModeFlags::DOUBLE_SCAN) {
            f.write_str(" doublescan")?;
        }
        Ok(())
    }
}

/// Constants of the timing formula.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GtfParams {
    /// Horizontal granularity in pixels.
    pub character_cell: u32,
    /// Pixel clock resolution of the PLL in MHz.
    pub clock_step_mhz: u32,
    /// Horizontal sync width as a percentage of the line period.
    pub hsync_percent: f64,
    /// Blanking formula gradient, %/kHz.
    pub m: f64,
    /// Blanking formula offset, %.
    pub c: f64,
    /// Blanking time scaling factor.
    pub k: f64,
    /// Scaling factor weighting.
    pub j: f64,
    /// Lines of vertical front porch.
    pub v_front_porch: u32,
    /// Minimum time for vertical sync plus back porch, µs.
    pub min_vsync_bp_us: f64,
    /// Lines of vertical sync.
    pub vsync_width: u32,
    /// Minimum lines of vertical back porch.
    pub v_back_porch: u32,
    /// Border on each side of the active area, as a percentage of the
    /// display height (top/bottom) or width (left/right).
    pub margin_percent: f64,
    /// Add `margin_percent` borders to the GTF timing. Reduced blanking
    /// never carries borders.
    pub margins: bool,
    /// Reduced blanking: pixels of horizontal blanking.
    pub rb_h_blank: u32,
    /// Reduced blanking: pixels of horizontal sync.
    pub rb_h_sync: u32,
    /// Reduced blanking: lines of vertical front porch.
    pub rb_v_front_porch: u32,
    /// Reduced blanking: minimum vertical blanking time, µs.
    pub rb_min_v_blank_us: f64,
}

impl Default for GtfParams {
    fn default() -> Self {
        Self {
            character_cell: CHARACTER_CELL,
            clock_step_mhz: 1,
            hsync_percent: 8.0,
            m: 600.0,
            c: 40.0,
            k: 128.0,
            j: 20.0,
            v_front_porch: 1,
            min_vsync_bp_us: 550.0,
            vsync_width: 3,
            v_back_porch: 6,
            margin_percent: 1.8,
            margins: false,
            rb_h_blank: 160,
            rb_h_sync: 32,
            rb_v_front_porch: 3,
            rb_min_v_blank_us: 460.0,
        }
    }
}

/// Pixel clock in MHz and both axes, before the clock is quantised.
type Timing = (f64, SyncTiming, SyncTiming, ModeFlags);

/// Round half up. Negative inputs clamp to 0.
#[inline]
fn round(x: f64) -> u32 {
    if x <= 0.0 { 0 } else { (x + 0.5) as u32 }
}

impl GtfParams {
    /// Check the constants before they reach the formula.
    ///
    /// The horizontal sync has to fit in half of the smallest blanking the
    /// formula produces, and the reduced-blanking sync in half of its fixed
    /// blank. Anything the checks here let through is still caught by
    /// [`Modeline::new`].
    pub fn validate(&self) -> Result<(), VideoError> {
        let finite = [
            self.hsync_percent,
            self.m,
            self.c,
            self.k,
            self.j,
            self.min_vsync_bp_us,
            self.margin_percent,
            self.rb_min_v_blank_us,
        ]
        .iter()
        .all(|x| x.is_finite());
        let counts_in_range = [
            self.character_cell,
            self.v_front_porch,
            self.vsync_width,
            self.v_back_porch,
            self.rb_h_blank,
            self.rb_v_front_porch,
        ]
        .iter()
        .all(|&n| n <= MAX_DIMENSION);

        if !finite
            || !counts_in_range
            || self.character_cell == 0
            || self.clock_step_mhz == 0
            || self.hsync_percent <= 0.0
            || self.hsync_percent > MIN_DUTY_CYCLE / 2.0
            || self.min_vsync_bp_us < 0.0
            || !(0.0..50.0).contains(&self.margin_percent)
            || self.rb_h_sync > self.rb_h_blank / 2
            || self.rb_min_v_blank_us < 0.0
        {
            return Err(VideoError::InvalidTimingParams);
        }
        Ok(())
    }

    /// Compute a modeline for `width` x `height` at `refresh_hz`.
    ///
    /// `width` is first truncated to a multiple of the character cell, so
    /// the returned horizontal display may be smaller than requested. A
    /// resolution outside the supported domain is
    /// [`VideoError::InvalidResolution`]; constants that fail
    /// [`validate`](Self::validate) or leave no frame time for the active
    /// lines are [`VideoError::InvalidTimingParams`].
    pub fn compute(
        &self,
        width: u32,
        height: u32,
        refresh_hz: u32,
        reduced_blanking: bool,
    ) -> Result<Modeline, VideoError> {
        self.validate()?;

        let h_display = width - width % self.character_cell;
        if !(1..=MAX_DIMENSION).contains(&h_display)
            || !(1..=MAX_DIMENSION).contains(&height)
            || !(1..=MAX_REFRESH_HZ).contains(&refresh_hz)
        {
            return Err(VideoError::InvalidResolution {
                width,
                height,
                refresh_hz,
            });
        }

        let (pixel_freq, horizontal, vertical, flags) = if reduced_blanking {
            self.reduced_blanking(h_display, height, refresh_hz)?
        } else {
            self.gtf(h_display, height, refresh_hz)?
        };

        let step = self.clock_step_mhz;
        let pixel_clock_mhz = round(pixel_freq / step as f64)
            .max(1)
            .checked_mul(step)
            .ok_or(VideoError::InvalidTimingParams)?;

        Modeline::new(pixel_clock_mhz, horizontal, vertical, flags)
    }

    fn gtf(&self, h_display: u32, height: u32, refresh_hz: u32) -> Result<Timing, VideoError> {
        let cell = self.character_cell;
        let field_rate = refresh_hz as f64;

        let (side_margin, top_margin) = if self.margins {
            let fraction = self.margin_percent / 100.0;
            (
                round(h_display as f64 * fraction / cell as f64) * cell,
                round(height as f64 * fraction),
            )
        } else {
            (0, 0)
        };

        // Estimate the line period from the frame time left after the
        // minimum vertical sync + back porch.
        let h_period_est = (1.0 / field_rate - self.min_vsync_bp_us / 1_000_000.0)
            / (height + 2 * top_margin + self.v_front_porch) as f64
            * 1_000_000.0;
        if h_period_est <= 0.0 {
            return Err(VideoError::InvalidTimingParams);
        }

        let vsync_bp = round(self.min_vsync_bp_us / h_period_est).max(self.vsync_width + self.v_back_porch);
        let v_total = [2 * top_margin, vsync_bp, self.v_front_porch]
            .into_iter()
            .try_fold(height, u32::checked_add)
            .ok_or(VideoError::InvalidTimingParams)?;

        let v_field_rate_est = 1_000_000.0 / (h_period_est * v_total as f64);
        let h_period = h_period_est / (field_rate / v_field_rate_est);

        let c_prime = (self.c - self.j) * self.k / 256.0 + self.j;
        let m_prime = self.k / 256.0 * self.m;
        let duty_cycle = (c_prime - m_prime * h_period / 1000.0).max(MIN_DUTY_CYCLE);

        let h_active = h_display + 2 * side_margin;
        let h_blank = round(h_active as f64 * duty_cycle / (100.0 - duty_cycle) / (2 * cell) as f64)
            .checked_mul(2 * cell)
            .ok_or(VideoError::InvalidTimingParams)?
            .max(2 * cell);
        let h_total = h_active
            .checked_add(h_blank)
            .ok_or(VideoError::InvalidTimingParams)?;
        let pixel_freq = h_total as f64 / h_period;

        let h_sync = round(self.hsync_percent / 100.0 * h_total as f64 / cell as f64) * cell;
        let h_front_porch = (h_blank / 2).saturating_sub(h_sync);

        // Borders sit between the active area and the porches.
        let h_sync_start = h_display + side_margin + h_front_porch;
        let horizontal = SyncTiming {
            display: h_display,
            sync_start: h_sync_start,
            sync_end: h_sync_start + h_sync,
            total: h_total,
        };

        let v_sync_start = height + top_margin + self.v_front_porch;
        let vertical = SyncTiming {
            display: height,
            sync_start: v_sync_start,
            sync_end: v_sync_start + self.vsync_width,
            total: v_total,
        };

        Ok((pixel_freq, horizontal, vertical, ModeFlags::HSYNC_NEGATIVE))
    }

    fn reduced_blanking(&self, h_display: u32, height: u32, refresh_hz: u32) -> Result<Timing, VideoError> {
        let field_rate = refresh_hz as f64;

        let h_period_est = (1_000_000.0 / field_rate - self.rb_min_v_blank_us) / height as f64;
        if h_period_est <= 0.0 {
            return Err(VideoError::InvalidTimingParams);
        }
        let vbi_lines = ((self.rb_min_v_blank_us / h_period_est) as u32).saturating_add(1);
        let min_vbi = self.rb_v_front_porch + self.vsync_width + self.v_back_porch;
        let v_total = height
            .checked_add(vbi_lines.max(min_vbi))
            .ok_or(VideoError::InvalidTimingParams)?;

        let h_total = h_display + self.rb_h_blank;
        let pixel_freq = field_rate * v_total as f64 * h_total as f64 / 1_000_000.0;

        let h_sync_start = h_display + self.rb_h_blank / 2 - self.rb_h_sync;
        let horizontal = SyncTiming {
            display: h_display,
            sync_start: h_sync_start,
            sync_end: h_sync_start + self.rb_h_sync,
            total: h_total,
        };

        let v_sync_start = height + self.rb_v_front_porch;
        let vertical = SyncTiming {
            display: height,
            sync_start: v_sync_start,
            sync_end: v_sync_start + self.vsync_width,
            total: v_total,
        };

        Ok((pixel_freq, horizontal, vertical, ModeFlags::VSYNC_NEGATIVE))
    }
}

/// [`GtfParams::compute`] with the default formula constants.
///
/// # Panics
///
/// If the truncated width, the height or the refresh rate is zero, or
/// any of them exceeds [`MAX_DIMENSION`] / [`MAX_REFRESH_HZ`].
pub fn compute_modeline(width: u32, height: u32, refresh_hz: u32, reduced_blanking: bool) -> Modeline {
    match GtfParams::default().compute(width, height, refresh_hz, reduced_blanking) {
        Ok(modeline) => modeline,
        Err(err) => panic!("no timing for {}x{}@{}: {}", width, height, refresh_hz, err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WIDTHS: [u32; 7] = [320, 512, 640, 800, 1024, 1280, 1920];
    const HEIGHTS: [u32; 6] = [200, 400, 480, 600, 768, 1080];
    const RATES: [u32; 5] = [50, 60, 70, 85, 120];

    fn each_mode(mut f: impl FnMut(u32, u32, u32, Modeline)) {
        for &w in &WIDTHS {
            for &h in &HEIGHTS {
                for &r in &RATES {
                    for rb in [false, true] {
                        f(w, h, r, compute_modeline(w, h, r, rb));
                    }
                }
            }
        }
    }

    #[test]
    fn vga_70hz() {
        let ml = compute_modeline(640, 480, 70, false);
        assert_eq!(ml.pixel_clock_mhz(), 29);
        assert_eq!(
            ml.horizontal(),
            SyncTiming {
                display: 640,
                sync_start: 664,
                sync_end: 728,
                total: 816,
            }
        );
        assert_eq!(
            ml.vertical(),
            SyncTiming {
                display: 480,
                sync_start: 481,
                sync_end: 484,
                total: 500,
            }
        );
        assert_eq!(ml.flags(), ModeFlags::HSYNC_NEGATIVE);
        assert_eq!(ml.refresh_hz(), 71);
    }

    #[test]
    fn width_is_truncated_to_character_cell() {
        let ml = compute_modeline(641, 480, 60, false);
        assert_eq!(ml.horizontal().display, 640);
        assert_eq!(ml, compute_modeline(640, 480, 60, false));
    }

    #[test]
    fn totals_exceed_display_and_are_cell_aligned() {
        each_mode(|w, h, _, ml| {
            let hz = ml.horizontal();
            let vt = ml.vertical();
            assert_eq!(hz.display, w);
            assert_eq!(vt.display, h);
            assert!(hz.total > hz.display);
            assert!(vt.total > vt.display);
            assert!(hz.is_ordered() && vt.is_ordered());
            assert!(ml.pixel_clock_mhz() > 0);
            assert_eq!(hz.display % CHARACTER_CELL, 0);
            assert_eq!(hz.total % CHARACTER_CELL, 0);
        });
    }

    #[test]
    fn identical_inputs_give_identical_modelines() {
        each_mode(|w, h, r, ml| {
            let again = compute_modeline(w, h, r, ml.flags().contains(ModeFlags::VSYNC_NEGATIVE));
            assert_eq!(ml, again);
        });
    }

    #[test]
    fn margins_split_evenly() {
        each_mode(|_, _, _, ml| {
            for axis in [ml.horizontal(), ml.vertical()] {
                let lead = axis.leading_margin();
                let trail = axis.total - axis.display - lead;
                assert!(trail >= lead && trail - lead <= 1);
            }
        });
    }

    #[test]
    fn refresh_tracks_request() {
        each_mode(|_, _, r, ml| {
            let got = ml.refresh_hz() as i64;
            // The clock is quantised to whole MHz, which moves the refresh a little.
            assert!((got - r as i64).abs() <= r as i64 / 8 + 1, "{} vs {}", got, r);
        });
    }

    #[test]
    fn reduced_blanking_shape() {
        let ml = compute_modeline(1920, 1080, 60, true);
        let h = ml.horizontal();
        assert_eq!(h.total, 2080);
        assert_eq!(h.sync_start, 1968);
        assert_eq!(h.sync_width(), 32);
        assert_eq!(ml.vertical().sync_start, 1083);
        assert_eq!(ml.flags(), ModeFlags::VSYNC_NEGATIVE);
    }

    #[test]
    fn tiny_and_slow_modes_keep_blanking() {
        let ml = compute_modeline(8, 1, 1, false);
        assert!(ml.horizontal().total >= 8 + 2 * CHARACTER_CELL);
        assert!(ml.vertical().is_well_formed());
    }

    #[test]
    #[should_panic]
    fn zero_refresh_is_a_precondition_violation() {
        compute_modeline(640, 480, 0, false);
    }

    #[test]
    fn constructor_checks_ordering() {
        let h = SyncTiming {
            display: 640,
            sync_start: 600,
            sync_end: 700,
            total: 800,
        };
        let v = SyncTiming {
            display: 480,
            sync_start: 490,
            sync_end: 492,
            total: 525,
        };
        assert_eq!(Modeline::new(25, h, v, ModeFlags::empty()), Err(VideoError::InvalidModeline));
        let h = SyncTiming { sync_start: 656, sync_end: 752, ..h };
        assert!(Modeline::new(25, h, v, ModeFlags::empty()).is_ok());
        assert_eq!(Modeline::new(0, h, v, ModeFlags::empty()), Err(VideoError::InvalidModeline));
    }

    #[test]
    fn constructor_needs_active_area_and_blanking() {
        let empty = SyncTiming {
            display: 0,
            sync_start: 0,
            sync_end: 0,
            total: 0,
        };
        let v = SyncTiming {
            display: 480,
            sync_start: 490,
            sync_end: 492,
            total: 525,
        };
        assert_eq!(Modeline::new(25, empty, empty, ModeFlags::empty()), Err(VideoError::InvalidModeline));
        assert_eq!(Modeline::new(25, empty, v, ModeFlags::empty()), Err(VideoError::InvalidModeline));

        let no_blank = SyncTiming {
            display: 640,
            sync_start: 640,
            sync_end: 640,
            total: 640,
        };
        assert_eq!(Modeline::new(25, no_blank, v, ModeFlags::empty()), Err(VideoError::InvalidModeline));
    }

    #[test]
    fn out_of_range_constants_are_refused() {
        let defaults = GtfParams::default();
        assert_eq!(defaults.validate(), Ok(()));

        let broken = [
            GtfParams { hsync_percent: 150.0, ..defaults },
            GtfParams { hsync_percent: 0.0, ..defaults },
            GtfParams { character_cell: 0, ..defaults },
            GtfParams { clock_step_mhz: 0, ..defaults },
            GtfParams { margin_percent: 60.0, ..defaults },
            GtfParams { m: f64::NAN, ..defaults },
            GtfParams { v_front_porch: u32::MAX, ..defaults },
            GtfParams { rb_h_sync: 100, ..defaults },
        ];
        for params in broken {
            assert_eq!(params.validate(), Err(VideoError::InvalidTimingParams), "{:?}", params);
            assert_eq!(params.compute(640, 480, 60, false), Err(VideoError::InvalidTimingParams));
            assert_eq!(params.compute(640, 480, 60, true), Err(VideoError::InvalidTimingParams));
        }
    }

    #[test]
    fn sync_time_longer_than_the_frame_is_refused() {
        let params = GtfParams {
            min_vsync_bp_us: 20_000.0,
            rb_min_v_blank_us: 20_000.0,
            ..GtfParams::default()
        };
        assert_eq!(params.validate(), Ok(()));
        assert_eq!(params.compute(640, 480, 60, false), Err(VideoError::InvalidTimingParams));
        assert_eq!(params.compute(640, 480, 60, true), Err(VideoError::InvalidTimingParams));
    }

    #[test]
    fn compute_reports_resolution_outside_domain() {
        let params = GtfParams::default();
        assert_eq!(
            params.compute(7, 480, 60, false),
            Err(VideoError::InvalidResolution {
                width: 7,
                height: 480,
                refresh_hz: 60,
            })
        );
        assert!(matches!(
            params.compute(640, 480, MAX_REFRESH_HZ + 1, true),
            Err(VideoError::InvalidResolution { .. })
        ));
    }

    #[test]
    fn margins_widen_the_frame_around_the_same_display() {
        let plain = compute_modeline(640, 480, 60, false);
        let bordered = GtfParams {
            margins: true,
            ..GtfParams::default()
        }
        .compute(640, 480, 60, false)
        .unwrap();

        let h = bordered.horizontal();
        let v = bordered.vertical();
        assert_eq!(h.display, 640);
        assert_eq!(v.display, 480);
        // 1.8 % of 480 lines rounds to 9, of 640 pixels to one 8-pixel cell.
        assert_eq!(v.sync_start, 480 + 9 + 1);
        assert_eq!(v.sync_end, v.sync_start + 3);
        assert!(h.sync_start >= 640 + 8);
        assert!(h.total > plain.horizontal().total);
        assert!(v.total >= plain.vertical().total + 18);
        assert_eq!(h.total % CHARACTER_CELL, 0);
        assert_eq!(h.sync_start % CHARACTER_CELL, 0);
        assert_eq!(bordered.flags(), plain.flags());

        let got = bordered.refresh_hz() as i64;
        assert!((got - 60).abs() <= 60 / 8 + 1, "{}", got);
    }

    #[test]
    fn margins_keep_every_mode_ordered() {
        let params = GtfParams {
            margins: true,
            ..GtfParams::default()
        };
        for &w in &WIDTHS {
            for &h in &HEIGHTS {
                for &r in &RATES {
                    let ml = params.compute(w, h, r, false).unwrap();
                    assert!(ml.horizontal().is_well_formed() && ml.vertical().is_well_formed());
                }
            }
        }
    }

    #[test]
    fn margins_do_not_touch_reduced_blanking() {
        let params = GtfParams {
            margins: true,
            ..GtfParams::default()
        };
        assert_eq!(params.compute(1920, 1080, 60, true), Ok(compute_modeline(1920, 1080, 60, true)));
    }

    #[test]
    fn x11_text_form() {
        let ml = compute_modeline(640, 480, 70, false);
        assert_eq!(
            format!("{}", ml),
            "Modeline \"640x480\" 29 640 664 728 816 480 481 484 500 -hsync +vsync"
        );
    }
}
