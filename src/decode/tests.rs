use crate::model::{ByteOrder, Coordinate, PixelType, PlaneDescriptor, PlanePixels};

use super::{DecodeError, PixelDecoder, PlaneLayout, select_channel};

fn gray_decoder() -> PixelDecoder {
    PixelDecoder::new(
        PlaneLayout {
            x_position: 0,
            y_position: 1,
            channel_position: None,
        },
        Some(0.5),
    )
}

fn rgb_decoder() -> PixelDecoder {
    PixelDecoder::new(
        PlaneLayout {
            x_position: 1,
            y_position: 2,
            channel_position: Some(0),
        },
        None,
    )
}

#[test]
fn decodes_u8_plane_row_major() {
    let descriptor = PlaneDescriptor::gray(PixelType::U8, 3, 2);
    let image = gray_decoder()
        .decode(&[1, 2, 3, 4, 5, 6], &descriptor, &Coordinate::new().time(4))
        .expect("decode");
    assert_eq!(image.width(), 3);
    assert_eq!(image.height(), 2);
    assert_eq!(image.bytes_per_pixel(), 1);
    assert_eq!(image.coordinate, Coordinate::new().time(4));
    assert_eq!(image.metadata.bit_depth, 8);
    assert_eq!(image.metadata.pixel_size_um, Some(0.5));
    let data = image.pixels.as_u8().expect("u8 pixels");
    assert_eq!(data[[1, 0]], 4);
    assert_eq!(data[[0, 2]], 3);
}

#[test]
fn u16_honors_declared_byte_order() {
    let bytes = [0x01, 0x02, 0x03, 0x04];
    let little = PlaneDescriptor::gray(PixelType::U16, 2, 1);
    let big = little.clone().with_byte_order(ByteOrder::BigEndian);

    let image = gray_decoder()
        .decode(&bytes, &little, &Coordinate::new())
        .expect("little endian");
    assert_eq!(
        image.pixels.as_u16().expect("u16").iter().copied().collect::<Vec<_>>(),
        vec![0x0201, 0x0403]
    );

    let image = gray_decoder()
        .decode(&bytes, &big, &Coordinate::new())
        .expect("big endian");
    assert_eq!(
        image.pixels.as_u16().expect("u16").iter().copied().collect::<Vec<_>>(),
        vec![0x0102, 0x0304]
    );
}

#[test]
fn interleaved_rgb_extracts_every_third_sample() {
    // Channel k of pixel i holds 10 * i + k.
    let pixels = 4;
    let bytes = (0..pixels)
        .flat_map(|i| (0..3).map(move |k| (10 * i + k) as u8))
        .collect::<Vec<_>>();
    let descriptor = PlaneDescriptor::interleaved(PixelType::U8, 3, 2, 2);
    for channel in 0..3_u64 {
        let image = rgb_decoder()
            .decode(&bytes, &descriptor, &Coordinate::new().channel(channel))
            .expect("decode");
        let samples = image
            .pixels
            .as_u8()
            .expect("u8")
            .iter()
            .copied()
            .collect::<Vec<_>>();
        let expected = (0..pixels)
            .map(|i| bytes[3 * i + channel as usize])
            .collect::<Vec<_>>();
        assert_eq!(samples, expected);
    }
}

#[test]
fn interleaved_u16_unpacks_before_selecting() {
    let samples: [u16; 6] = [100, 200, 300, 400, 500, 600];
    let bytes = samples
        .iter()
        .flat_map(|value| value.to_be_bytes())
        .collect::<Vec<_>>();
    let descriptor = PlaneDescriptor::interleaved(PixelType::U16, 3, 2, 1)
        .with_byte_order(ByteOrder::BigEndian);
    let image = rgb_decoder()
        .decode(&bytes, &descriptor, &Coordinate::new().channel(1))
        .expect("decode");
    match image.pixels {
        PlanePixels::U16(data) => {
            assert_eq!(data.iter().copied().collect::<Vec<_>>(), vec![200, 500]);
        }
        other => panic!("unexpected pixels {other:?}"),
    }
}

#[test]
fn multichannel_flag_without_channel_first_layout_is_not_split() {
    let decoder = PixelDecoder::new(
        PlaneLayout {
            x_position: 0,
            y_position: 1,
            channel_position: Some(2),
        },
        None,
    );
    let mut descriptor = PlaneDescriptor::gray(PixelType::U8, 2, 2);
    descriptor.multichannel = true;
    descriptor.interleave_count = 3;
    let image = decoder
        .decode(&[1, 2, 3, 4], &descriptor, &Coordinate::new().channel(1))
        .expect("decode");
    assert_eq!(image.pixels.as_u8().expect("u8").len(), 4);
}

#[test]
fn channel_beyond_interleave_is_rejected() {
    let descriptor = PlaneDescriptor::interleaved(PixelType::U8, 3, 1, 1);
    let error = rgb_decoder()
        .decode(&[1, 2, 3], &descriptor, &Coordinate::new().channel(3))
        .expect_err("channel out of range");
    assert!(matches!(
        error,
        DecodeError::ChannelOutOfRange {
            channel: 3,
            count: 3
        }
    ));
}

#[test]
fn other_interleave_counts_are_rejected() {
    let descriptor = PlaneDescriptor::interleaved(PixelType::U8, 4, 1, 1);
    let error = rgb_decoder()
        .decode(&[1, 2, 3, 4], &descriptor, &Coordinate::new())
        .expect_err("rgba");
    assert!(matches!(error, DecodeError::UnsupportedInterleave(4)));
}

#[test]
fn byte_length_mismatch_is_an_error() {
    let descriptor = PlaneDescriptor::gray(PixelType::U16, 2, 2);
    let error = gray_decoder()
        .decode(&[0; 7], &descriptor, &Coordinate::new())
        .expect_err("short plane");
    assert!(matches!(
        error,
        DecodeError::LengthMismatch {
            expected: 8,
            actual: 7
        }
    ));
}

#[test]
fn wide_samples_are_rejected_not_truncated() {
    let descriptor = PlaneDescriptor::gray(PixelType::F32, 1, 1);
    let error = gray_decoder()
        .decode(&1.5_f32.to_le_bytes(), &descriptor, &Coordinate::new())
        .expect_err("float plane");
    assert!(matches!(
        error,
        DecodeError::UnsupportedSampleWidth {
            pixel_type: PixelType::F32,
            bytes: 4
        }
    ));
}

#[test]
fn missing_planar_axis_is_reported() {
    let mut descriptor = PlaneDescriptor::gray(PixelType::U8, 2, 2);
    descriptor.lengths.truncate(1);
    let error = gray_decoder()
        .decode(&[0; 4], &descriptor, &Coordinate::new())
        .expect_err("missing Y");
    assert!(matches!(error, DecodeError::MissingPlanarAxis(1)));
}

#[test]
fn select_channel_is_identity_for_single_stride() {
    assert_eq!(select_channel(&[1, 2, 3], 1, 0), vec![1, 2, 3]);
    assert_eq!(select_channel(&[1, 2, 3, 4, 5, 6], 3, 2), vec![3, 6]);
}

#[test]
fn oversized_plane_is_an_error() {
    let descriptor = PlaneDescriptor::gray(PixelType::U16, u64::MAX / 2, 4);
    let error = gray_decoder()
        .decode(&[0; 8], &descriptor, &Coordinate::new())
        .expect_err("plane size overflows");
    assert!(matches!(error, DecodeError::PlaneTooLarge { .. }));
}
