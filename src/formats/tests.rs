use std::fs::File;

use image::{ImageBuffer, Luma, Rgb};
use tempfile::tempdir;
use tiff::encoder::{TiffEncoder, colortype};

use super::{
    FormatError, FormatReader, MemoryReader, RawPlane, open_reader, position_to_raster,
    raster_to_position,
};
use crate::model::{PixelType, PlaneDescriptor, ReaderAxis};

#[test]
fn mixed_radix_varies_first_axis_fastest() {
    let lengths = [2, 10];
    assert_eq!(raster_to_position(&lengths, 0).expect("position"), vec![0, 0]);
    assert_eq!(raster_to_position(&lengths, 1).expect("position"), vec![1, 0]);
    assert_eq!(raster_to_position(&lengths, 7).expect("position"), vec![1, 3]);
    assert_eq!(position_to_raster(&lengths, &[1, 3]).expect("raster"), 7);
    assert!(raster_to_position(&lengths, 20).is_err());
    assert!(position_to_raster(&lengths, &[2, 0]).is_err());
    assert!(position_to_raster(&lengths, &[0]).is_err());
}

#[test]
fn overflowing_axis_lengths_are_rejected() {
    let lengths = [u64::MAX / 2, 4];
    assert!(matches!(
        raster_to_position(&lengths, 1),
        Err(FormatError::RasterOverflow(_))
    ));
    assert!(matches!(
        position_to_raster(&lengths, &[1, 3]),
        Err(FormatError::RasterOverflow(_))
    ));
    let axes = vec![
        ReaderAxis::new("X", 1),
        ReaderAxis::new("Y", 1),
        ReaderAxis::new("Time", u64::MAX / 2),
        ReaderAxis::new("Z", 4),
    ];
    assert!(MemoryReader::synthetic("huge", axes, PlaneDescriptor::gray(PixelType::U8, 1, 1)).is_err());
}

#[test]
fn empty_raster_axes_address_a_single_plane() {
    assert_eq!(raster_to_position(&[], 0).expect("position"), Vec::<u64>::new());
    assert_eq!(position_to_raster(&[], &[]).expect("raster"), 0);
    assert!(raster_to_position(&[], 1).is_err());
}

#[test]
fn tiff_pages_become_z_planes() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("stack.tiff");
    let mut encoder = TiffEncoder::new(File::create(&path).expect("create")).expect("encoder");
    for page in 0..3_u16 {
        let data = vec![page * 1000; 6];
        encoder
            .write_image::<colortype::Gray16>(3, 2, &data)
            .expect("write page");
    }
    drop(encoder);

    let mut reader = open_reader(&path).expect("open tiff");
    let labels = reader
        .axes()
        .iter()
        .map(|axis| axis.label.as_str())
        .collect::<Vec<_>>();
    assert_eq!(labels, vec!["X", "Y", "Z"]);
    assert_eq!(reader.plane_count(), 3);
    assert_eq!(reader.raster_lengths(), vec![3]);

    let plane = reader.read_plane(2).expect("read page");
    assert_eq!(plane.descriptor.pixel_type, PixelType::U16);
    assert_eq!(plane.descriptor.lengths, vec![3, 2]);
    assert_eq!(plane.bytes.len(), 12);
    assert_eq!(u16::from_le_bytes([plane.bytes[0], plane.bytes[1]]), 2000);
    assert!(matches!(
        reader.read_plane(3),
        Err(FormatError::PlaneOutOfRange { index: 3, count: 3 })
    ));
}

#[test]
fn rgb_png_is_channel_interleaved() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("color.png");
    let mut image = ImageBuffer::<Rgb<u8>, Vec<u8>>::new(2, 1);
    image.put_pixel(0, 0, Rgb([255, 0, 0]));
    image.put_pixel(1, 0, Rgb([0, 255, 7]));
    image.save(&path).expect("save png");

    let mut reader = open_reader(&path).expect("open png");
    assert_eq!(reader.axes()[0], ReaderAxis::new("Channel", 3));
    assert_eq!(reader.plane_count(), 1);
    let plane = reader.read_plane(0).expect("plane");
    assert!(plane.descriptor.multichannel);
    assert_eq!(plane.descriptor.interleave_count, 3);
    assert_eq!(plane.descriptor.lengths, vec![3, 2, 1]);
    assert_eq!(plane.bytes, vec![255, 0, 0, 0, 255, 7]);
}

#[test]
fn gray_png_has_only_planar_axes() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("gray.png");
    let image =
        ImageBuffer::<Luma<u8>, Vec<u8>>::from_vec(2, 2, vec![0, 50, 100, 255]).expect("image");
    image.save(&path).expect("save png");

    let mut reader = open_reader(&path).expect("open png");
    assert_eq!(reader.axes().len(), 2);
    let plane = reader.read_plane(0).expect("plane");
    assert_eq!(plane.bytes, vec![0, 50, 100, 255]);
    reader.close().expect("close");
    assert!(matches!(reader.read_plane(0), Err(FormatError::Closed)));
}

#[test]
fn unsupported_extension_is_rejected() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("movie.avi");
    std::fs::write(&path, b"RIFF").expect("write");
    let error = open_reader(&path).err().expect("must fail");
    assert!(matches!(error, FormatError::UnsupportedFormat(ext) if ext == "avi"));
}

#[test]
fn memory_reader_validates_plane_count() {
    let axes = vec![
        ReaderAxis::new("X", 2),
        ReaderAxis::new("Y", 2),
        ReaderAxis::new("Time", 3),
    ];
    let plane = RawPlane {
        bytes: vec![0; 4],
        descriptor: PlaneDescriptor::gray(PixelType::U8, 2, 2),
    };
    assert!(MemoryReader::new("short", axes.clone(), vec![plane.clone(); 2]).is_err());
    let reader = MemoryReader::new("exact", axes, vec![plane; 3]).expect("reader");
    assert_eq!(reader.raster_lengths(), vec![3]);
    assert_eq!(reader.frame_addressed().raster_lengths(), vec![3]);
}

#[test]
fn synthetic_planes_encode_their_raster_index() {
    let axes = vec![
        ReaderAxis::new("X", 2),
        ReaderAxis::new("Y", 1),
        ReaderAxis::new("Z", 4),
    ];
    let template = PlaneDescriptor::gray(PixelType::U16, 2, 1)
        .with_byte_order(crate::model::ByteOrder::BigEndian);
    let mut reader = MemoryReader::synthetic("z", axes, template).expect("reader");
    assert_eq!(reader.plane_count(), 4);
    let plane = reader.read_plane(3).expect("plane");
    assert_eq!(plane.bytes, vec![0, 3, 0, 3]);
}
