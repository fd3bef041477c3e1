use otsu_seg::core::{to_grayscale, GrayImage, Histogram, Image, ImageView, BINS};
use otsu_seg::dual_otsu::solve_dual_otsu;
use otsu_seg::peaks::{detect_peaks, PeakSet};
use otsu_seg::planner::plan_threshold_count;
use otsu_seg::{
    BackgroundTone, BandPlacement, DualThresholds, PassthroughReason, PolarityPolicy,
    SegmentError, Segmenter, SegmenterParams, ThresholdCount, ThresholdPlan, BACKGROUND,
    FOREGROUND,
};

fn image_from_fn(width: usize, height: usize, f: impl Fn(usize, usize) -> u8) -> GrayImage {
    let mut data = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            data.push(f(x, y));
        }
    }
    GrayImage {
        width,
        height,
        data,
    }
}

/// 40x40 image at 50 with a 20x20 block at 200.
fn dark_frame_light_block() -> GrayImage {
    let mut img = GrayImage::filled(40, 40, 50);
    img.fill_rect(10, 10, 29, 29, 200);
    img
}

/// Left half 30, right half 220, a centered block at 120 whose last row is 125.
fn split_background_with_block() -> GrayImage {
    image_from_fn(60, 60, |x, y| {
        if (20..40).contains(&x) && (20..40).contains(&y) {
            if y == 39 {
                125
            } else {
                120
            }
        } else if x < 30 {
            30
        } else {
            220
        }
    })
}

fn count(img: &Image, value: u8) -> usize {
    img.data.iter().filter(|&&v| v == value).count()
}

#[test]
fn two_spikes_with_matching_border_use_one_threshold() {
    let mut bins = [0f32; BINS];
    bins[50] = 256.0;
    bins[200] = 180.0;
    let peaks = detect_peaks(&Histogram::from_bins(bins));
    assert_eq!(peaks.intensities(), vec![50, 200]);
    assert_eq!(
        plan_threshold_count(&peaks, &PeakSet::from_intensities(&[50])),
        ThresholdCount::Single
    );
}

#[test]
fn dark_background_keeps_light_object_as_foreground() {
    let img = dark_frame_light_block();
    let res = Segmenter::default().segment_gray(&img.view()).unwrap();

    assert_eq!(
        res.plan,
        Some(ThresholdPlan::Single {
            level: 125,
            background: BackgroundTone::Dark
        })
    );
    assert_eq!(res.background_peaks.intensities(), vec![50]);
    assert_eq!(res.image.as_gray().unwrap().get(0, 0), BACKGROUND);
    assert_eq!(res.image.as_gray().unwrap().get(20, 20), FOREGROUND);
    assert_eq!(count(&res.image, FOREGROUND), 400);
}

#[test]
fn light_background_inverts_the_output() {
    let mut img = GrayImage::filled(40, 40, 230);
    img.fill_rect(12, 12, 27, 27, 15);
    let res = Segmenter::default().segment_gray(&img.view()).unwrap();

    assert!(matches!(
        res.plan,
        Some(ThresholdPlan::Single {
            background: BackgroundTone::Light,
            ..
        })
    ));
    assert_eq!(res.image.as_gray().unwrap().get(0, 0), BACKGROUND);
    assert_eq!(res.image.as_gray().unwrap().get(20, 20), FOREGROUND);
}

#[test]
fn sandwiched_foreground_uses_two_thresholds() {
    let img = split_background_with_block();
    let seg = Segmenter::default();
    let res = seg.segment_gray(&img.view()).unwrap();

    assert_eq!(res.peaks.intensities(), vec![30, 120, 220]);
    assert_eq!(res.background_peaks.intensities(), vec![30, 220]);
    assert_eq!(
        res.plan,
        Some(ThresholdPlan::Dual {
            low: 30,
            high: 125,
            background: BandPlacement::Outside
        })
    );

    let out = res.image.as_gray().unwrap();
    assert_eq!(out.get(0, 0), BACKGROUND);
    assert_eq!(out.get(59, 59), BACKGROUND);
    assert_eq!(out.get(30, 30), FOREGROUND);
    // The top cut itself sits outside the band.
    assert_eq!(out.get(30, 39), BACKGROUND);
    assert_eq!(count(&res.image, FOREGROUND), 380);

    assert_eq!(seg.analyze(&img.view()).unwrap(), res.plan.unwrap());
}

#[test]
fn dual_cuts_separate_smooth_modes() {
    let mut bins = [0f32; BINS];
    for (i, b) in bins.iter_mut().enumerate() {
        let x = i as f32;
        *b = 200.0 * (-(x - 30.0).powi(2) / 120.0).exp()
            + 180.0 * (-(x - 120.0).powi(2) / 150.0).exp()
            + 256.0 * (-(x - 220.0).powi(2) / 120.0).exp();
    }
    let hist = Histogram::from_bins(bins);
    let peaks = detect_peaks(&hist);
    assert_eq!(peaks.intensities(), vec![30, 120, 220]);
    assert_eq!(
        plan_threshold_count(&peaks, &PeakSet::from_intensities(&[30, 220])),
        ThresholdCount::Dual
    );

    let t = solve_dual_otsu(&hist).unwrap();
    assert!((30..=75).contains(&t.low), "low = {}", t.low);
    assert!((150..=220).contains(&t.high), "high = {}", t.high);
}

#[test]
fn uniform_images_are_one_class() {
    let seg = Segmenter::default();

    let dark = GrayImage::filled(20, 20, 90);
    let res = seg.segment_gray(&dark.view()).unwrap();
    assert_eq!(
        res.plan,
        Some(ThresholdPlan::Single {
            level: 90,
            background: BackgroundTone::Dark
        })
    );
    assert!(res.image.data.iter().all(|&v| v == BACKGROUND));

    let light = GrayImage::filled(20, 20, 200);
    let res = seg.segment_gray(&light.view()).unwrap();
    assert!(res.image.data.iter().all(|&v| v == FOREGROUND));
}

#[test]
fn flat_histogram_passes_through() {
    let img = image_from_fn(16, 16, |x, y| (y * 16 + x) as u8);
    let seg = Segmenter::default();
    let res = seg.segment_gray(&img.view()).unwrap();

    assert!(res.is_passthrough());
    assert_eq!(res.passthrough, Some(PassthroughReason::EmptyHistogram));
    assert_eq!(res.plan, None);
    assert_eq!(res.image, Image::from(img.clone()));
    assert_eq!(
        seg.analyze(&img.view()),
        Err(SegmentError::DegenerateHistogram(
            PassthroughReason::EmptyHistogram
        ))
    );
}

/// Three vertical bands inside a noisy light frame that matches none of them.
fn bands_in_unmatched_frame() -> GrayImage {
    image_from_fn(100, 100, |x, y| {
        if x < 3 || y < 3 || x >= 97 || y >= 97 {
            240 + ((x + y) % 16) as u8
        } else if x < 35 {
            40
        } else if x < 66 {
            120
        } else {
            200
        }
    })
}

#[test]
fn unmatched_border_passes_through() {
    let img = bands_in_unmatched_frame();
    let res = Segmenter::default().segment_gray(&img.view()).unwrap();

    assert_eq!(res.peaks.intensities(), vec![40, 120, 200]);
    assert!(res.background_peaks.iter().all(|p| p.intensity >= 240));
    assert_eq!(res.passthrough, Some(PassthroughReason::NoBackgroundMatch));
    assert_eq!(res.image, Image::from(img));
}

#[test]
fn color_passthrough_returns_the_input_unchanged() {
    let gray = bands_in_unmatched_frame();
    let rgb: Vec<u8> = gray.data.iter().flat_map(|&v| [v, v, v]).collect();
    let res = Segmenter::default()
        .segment(&ImageView::new(100, 100, 3, &rgb).unwrap())
        .unwrap();

    assert_eq!(res.passthrough, Some(PassthroughReason::NoBackgroundMatch));
    assert_eq!((res.image.width, res.image.height), (100, 100));
    assert_eq!(res.image.channels, 3);
    assert_eq!(res.image.data.len(), 30000);
    assert_eq!(res.image.data, rgb);

    let rgba: Vec<u8> = gray.data.iter().flat_map(|&v| [v, v, v, 255]).collect();
    let res = Segmenter::default()
        .segment(&ImageView::new(100, 100, 4, &rgba).unwrap())
        .unwrap();
    assert!(res.is_passthrough());
    assert_eq!(res.image.channels, 4);
    assert_eq!(res.image.data, rgba);
}

#[test]
fn segmenting_twice_gives_the_same_answer() {
    let img = dark_frame_light_block();
    let seg = Segmenter::default();
    let first = seg.segment_gray(&img.view()).unwrap();
    let again = seg.segment_gray(&img.view()).unwrap();
    assert_eq!(first.image, again.image);
    assert_eq!(first.plan, again.plan);

    // A segmented image is a fixed point.
    let second = seg.segment_gray(&first.image.as_gray().unwrap()).unwrap();
    assert_eq!(second.image, first.image);
}

#[test]
fn rejects_images_smaller_than_the_border() {
    let img = GrayImage::filled(6, 20, 10);
    let err = Segmenter::default().segment_gray(&img.view()).unwrap_err();
    assert_eq!(
        err,
        SegmentError::InvalidImageSize {
            width: 6,
            height: 20,
            border_width: 3
        }
    );

    let wide = SegmenterParams {
        border_width: 10,
        ..SegmenterParams::default()
    };
    let img = GrayImage::filled(20, 20, 10);
    assert!(matches!(
        Segmenter::new(wide).segment_gray(&img.view()),
        Err(SegmentError::InvalidImageSize { .. })
    ));
}

#[test]
fn rejects_unsupported_channel_counts() {
    let data = vec![0u8; 10 * 10 * 2];
    let view = ImageView {
        width: 10,
        height: 10,
        channels: 2,
        data: &data,
    };
    assert_eq!(
        Segmenter::default().segment(&view).unwrap_err(),
        SegmentError::InvalidChannelCount { channels: 2 }
    );
}

#[test]
fn color_input_matches_its_grayscale() {
    let mut rgb = Vec::new();
    for y in 0..40 {
        for x in 0..40 {
            let inside = (10..30).contains(&x) && (10..30).contains(&y);
            rgb.extend_from_slice(if inside { &[240, 200, 60] } else { &[20, 40, 30] });
        }
    }
    let view = ImageView::new(40, 40, 3, &rgb).unwrap();
    let seg = Segmenter::default();

    let from_color = seg.segment(&view).unwrap();
    let gray = to_grayscale(&view).unwrap();
    let from_gray = seg.segment_gray(&gray.view()).unwrap();
    assert_eq!(from_color.image, from_gray.image);
    assert_eq!(from_color.image.as_gray().unwrap().get(20, 20), FOREGROUND);
}

struct AlwaysLight;

impl PolarityPolicy for AlwaysLight {
    fn single(&self, _: &PeakSet, _: &PeakSet) -> BackgroundTone {
        BackgroundTone::Light
    }

    fn dual(&self, _: DualThresholds, _: &PeakSet) -> BandPlacement {
        BandPlacement::Inside
    }
}

#[test]
fn custom_policy_flips_polarity() {
    let img = dark_frame_light_block();
    let seg = Segmenter::with_policy(SegmenterParams::default(), AlwaysLight);
    let res = seg.segment_gray(&img.view()).unwrap();
    assert_eq!(res.image.as_gray().unwrap().get(0, 0), FOREGROUND);
    assert_eq!(res.image.as_gray().unwrap().get(20, 20), BACKGROUND);

    let res = seg.segment_gray(&split_background_with_block().view()).unwrap();
    assert!(matches!(
        res.plan,
        Some(ThresholdPlan::Dual {
            background: BandPlacement::Inside,
            ..
        })
    ));
    assert_eq!(res.image.as_gray().unwrap().get(30, 30), BACKGROUND);
}

#[test]
fn debug_artifacts_are_opt_in() {
    let img = dark_frame_light_block();
    assert!(Segmenter::default()
        .segment_gray(&img.view())
        .unwrap()
        .debug
        .is_none());

    let params = SegmenterParams {
        emit_debug_artifacts: true,
        ..SegmenterParams::default()
    };
    let res = Segmenter::new(params)
        .segment_gray(&split_background_with_block().view())
        .unwrap();
    let debug = res.debug.expect("debug artifacts");
    assert_eq!(debug.peaks, res.peaks);
    assert_eq!(debug.plot.width, otsu_seg::debug::PLOT_WIDTH);
    assert_eq!(debug.plot.height, otsu_seg::debug::PLOT_HEIGHT);
    assert_eq!(
        debug.dual_thresholds,
        Some(DualThresholds { low: 30, high: 125 })
    );
}
