//! Byte fixtures for decoder tests, laid out as a server would send them.

use bytes::{BufMut, Bytes, BytesMut};

use crate::version::Version;

// Thresholds are literal; never import the decoders' `*_SINCE` constants.

pub(crate) fn put_vec3(raw: &mut BytesMut, v: [f32; 3]) {
    for c in v {
        raw.put_f32_le(c);
    }
}

pub(crate) fn put_identity(raw: &mut BytesMut) {
    for c in [0.0f32, 0.0, 0.0, 1.0] {
        raw.put_f32_le(c);
    }
}

pub(crate) fn put_cstring(raw: &mut BytesMut, s: &str) {
    raw.put_slice(s.as_bytes());
    raw.put_u8(0);
}

/// Element count, the byte size when the version calls for it, then the body.
pub(crate) fn put_section(raw: &mut BytesMut, version: Version, count: i32, body: &[u8]) {
    raw.put_i32_le(count);
    if version >= Version::major_minor(4, 1) {
        raw.put_i32_le(body.len() as i32);
    }
    raw.put_slice(body);
}

/// Message header followed by the body.
pub(crate) fn packet(message_id: u16, body: &[u8]) -> BytesMut {
    let mut raw = BytesMut::new();
    raw.put_u16_le(message_id);
    raw.put_u16_le(body.len() as u16);
    raw.put_slice(body);
    raw
}

pub(crate) fn marker_set(name: &str, markers: i32) -> BytesMut {
    let mut raw = BytesMut::new();
    put_cstring(&mut raw, name);
    raw.put_i32_le(markers);
    for i in 0..markers {
        let c = i as f32;
        put_vec3(&mut raw, [c, c, c]);
    }
    raw
}

pub(crate) fn rigid_body(version: Version, id: i32) -> BytesMut {
    let mut raw = BytesMut::new();
    raw.put_i32_le(id);
    put_vec3(&mut raw, [1.0, 2.0, 3.0]);
    put_identity(&mut raw);
    if version < Version::major(3) {
        raw.put_i32_le(2);
        put_vec3(&mut raw, [0.1, 0.2, 0.3]);
        put_vec3(&mut raw, [0.4, 0.5, 0.6]);
        if version >= Version::major(2) {
            raw.put_i32_le(10);
            raw.put_i32_le(11);
            raw.put_f32_le(0.01);
            raw.put_f32_le(0.02);
        }
    }
    if version >= Version::major(2) {
        raw.put_f32_le(0.5);
    }
    if version >= Version::major_minor(2, 6) {
        raw.put_i16_le(0x01);
    }
    raw
}

pub(crate) fn skeleton(version: Version, id: i32, rigid_bodies: i32) -> BytesMut {
    let mut raw = BytesMut::new();
    raw.put_i32_le(id);
    raw.put_i32_le(rigid_bodies);
    for i in 0..rigid_bodies {
        raw.put_slice(&rigid_body(version, i));
    }
    raw
}

pub(crate) fn asset(id: i32) -> BytesMut {
    let mut raw = BytesMut::new();
    raw.put_i32_le(id);
    raw.put_i32_le(1);
    raw.put_i32_le(1);
    put_vec3(&mut raw, [0.0, 1.0, 0.0]);
    put_identity(&mut raw);
    raw.put_f32_le(0.25);
    raw.put_i16_le(1);
    raw.put_i32_le(2);
    for marker_id in [100, 101] {
        raw.put_i32_le(marker_id);
        put_vec3(&mut raw, [0.0, 1.0, 0.0]);
        raw.put_f32_le(0.01);
        raw.put_i16_le(0);
        raw.put_f32_le(0.001);
    }
    raw
}

pub(crate) fn labeled_marker(version: Version, id: i32) -> BytesMut {
    let mut raw = BytesMut::new();
    raw.put_i32_le(id);
    put_vec3(&mut raw, [0.5, 1.5, 2.5]);
    raw.put_f32_le(0.014);
    if version >= Version::major_minor(2, 6) {
        raw.put_i16_le(0x24);
    }
    if version >= Version::major(3) {
        raw.put_f32_le(0.0002);
    }
    raw
}

pub(crate) fn analog(id: i32, channels: &[&[f32]]) -> BytesMut {
    let mut raw = BytesMut::new();
    raw.put_i32_le(id);
    raw.put_i32_le(channels.len() as i32);
    for samples in channels {
        raw.put_i32_le(samples.len() as i32);
        for s in *samples {
            raw.put_f32_le(*s);
        }
    }
    raw
}

pub(crate) fn suffix(version: Version) -> BytesMut {
    let mut raw = BytesMut::new();
    raw.put_u32_le(1);
    raw.put_u32_le(2);
    if version >= Version::major_minor(2, 7) {
        raw.put_f64_le(12.5);
    } else {
        raw.put_f32_le(12.5);
    }
    if version >= Version::major(3) {
        raw.put_u64_le(1000);
        raw.put_u64_le(2000);
        raw.put_u64_le(3000);
    }
    if version >= Version::major_minor(4, 1) {
        raw.put_u32_le(1_700_000_000);
        raw.put_u32_le(7);
    }
    if version >= Version::major_minor(2, 6) {
        raw.put_i16_le(0x03);
    }
    raw
}

/// A frame with every section the version knows about populated.
pub(crate) fn frame(version: Version, frame_number: i32) -> Bytes {
    let mut raw = BytesMut::new();
    raw.put_i32_le(frame_number);

    put_section(&mut raw, version, 1, &marker_set("Body", 2));

    let mut unlabeled = BytesMut::new();
    put_vec3(&mut unlabeled, [9.0, 9.0, 9.0]);
    put_section(&mut raw, version, 1, &unlabeled);

    let mut bodies = rigid_body(version, 1);
    bodies.put_slice(&rigid_body(version, 2));
    put_section(&mut raw, version, 2, &bodies);

    if version >= Version::major_minor(2, 1) {
        put_section(&mut raw, version, 1, &skeleton(version, 7, 2));
    }
    if version >= Version::major_minor(4, 1) {
        put_section(&mut raw, version, 1, &asset(12));
    }
    if version >= Version::major_minor(2, 3) {
        let mut markers = labeled_marker(version, 1);
        markers.put_slice(&labeled_marker(version, 2));
        put_section(&mut raw, version, 2, &markers);
    }
    if version >= Version::major_minor(2, 9) {
        put_section(&mut raw, version, 1, &analog(1, &[&[1.0, 2.0], &[3.0, 4.0]]));
    }
    if version >= Version::major_minor(2, 11) {
        put_section(&mut raw, version, 1, &analog(2, &[&[0.5]]));
    }

    raw.put_slice(&suffix(version));
    raw.put_i32_le(0);
    raw.freeze()
}

pub(crate) fn marker_set_description() -> BytesMut {
    let mut raw = BytesMut::new();
    put_cstring(&mut raw, "Body");
    raw.put_i32_le(2);
    put_cstring(&mut raw, "Head");
    put_cstring(&mut raw, "Chest");
    raw
}

pub(crate) fn rigid_body_description(version: Version, id: i32) -> BytesMut {
    let mut raw = BytesMut::new();
    if version >= Version::major(2) {
        put_cstring(&mut raw, "Wand");
    }
    raw.put_i32_le(id);
    raw.put_i32_le(-1);
    put_vec3(&mut raw, [0.0, 0.0, 0.0]);
    if version >= Version::major(3) {
        raw.put_i32_le(2);
        put_vec3(&mut raw, [0.1, 0.0, 0.0]);
        put_vec3(&mut raw, [0.0, 0.1, 0.0]);
        raw.put_i32_le(1);
        raw.put_i32_le(2);
        if version >= Version::major(4) {
            put_cstring(&mut raw, "Marker1");
            put_cstring(&mut raw, "Marker2");
        }
    }
    raw
}

pub(crate) fn skeleton_description(version: Version) -> BytesMut {
    let mut raw = BytesMut::new();
    put_cstring(&mut raw, "Actor");
    raw.put_i32_le(1);
    raw.put_i32_le(2);
    for id in 0..2 {
        raw.put_slice(&rigid_body_description(version, id));
    }
    raw
}

pub(crate) fn force_plate_description(version: Version) -> BytesMut {
    let mut raw = BytesMut::new();
    raw.put_i32_le(1);
    put_cstring(&mut raw, "FP-001");
    raw.put_f32_le(0.6);
    raw.put_f32_le(0.4);
    put_vec3(&mut raw, [0.0, 0.0, 0.0]);
    for row in 0..12 {
        for col in 0..12 {
            raw.put_f32_le(if row == col { 1.0 } else { 0.0 });
        }
    }
    for corner in 0..4 {
        let c = corner as f32;
        put_vec3(&mut raw, [c, c, c]);
    }
    if version >= Version::major(3) {
        raw.put_i32_le(1);
        raw.put_i32_le(0);
    }
    raw.put_i32_le(3);
    for name in ["Fx", "Fy", "Fz"] {
        put_cstring(&mut raw, name);
    }
    raw
}

pub(crate) fn device_description() -> BytesMut {
    let mut raw = BytesMut::new();
    raw.put_i32_le(2);
    put_cstring(&mut raw, "EMG");
    put_cstring(&mut raw, "D-42");
    raw.put_i32_le(1);
    raw.put_i32_le(0);
    raw.put_i32_le(1);
    put_cstring(&mut raw, "ch1");
    raw
}

pub(crate) fn camera_description() -> BytesMut {
    let mut raw = BytesMut::new();
    put_cstring(&mut raw, "Prime 41 #1");
    put_vec3(&mut raw, [1.0, 2.0, 3.0]);
    put_identity(&mut raw);
    raw
}

/// One description of every known kind.
pub(crate) fn data_descriptions(version: Version) -> Bytes {
    let bodies = [
        (0, marker_set_description()),
        (1, rigid_body_description(version, 3)),
        (2, skeleton_description(version)),
        (3, force_plate_description(version)),
        (4, device_description()),
        (5, camera_description()),
    ];
    let mut raw = BytesMut::new();
    raw.put_i32_le(bodies.len() as i32);
    for (kind, body) in bodies {
        raw.put_i32_le(kind);
        if version >= Version::major_minor(4, 1) {
            raw.put_i32_le(body.len() as i32);
        }
        raw.put_slice(&body);
    }
    raw.freeze()
}
