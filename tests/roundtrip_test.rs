//! Round-trip tests: a model built through the API, written to text, and
//! read back must reproduce the sequence of vertices, faces, and group
//! memberships used to build it.

use std::io::Cursor;

use libobj::{Face, Obj};

fn roundtrip(obj: &Obj) -> Obj {
    let mut out = Vec::new();
    obj.to_writer(&mut out).unwrap();
    Obj::from_reader(Cursor::new(out)).unwrap()
}

fn assert_same_geometry(a: &Obj, b: &Obj) {
    assert_eq!(a.vertices(), b.vertices());
    assert_eq!(a.tex_coords(), b.tex_coords());
    assert_eq!(a.normals(), b.normals());
    assert_eq!(a.faces(), b.faces());
}

fn assert_same_groups(a: &Obj, b: &Obj) {
    assert_eq!(a.num_groups(), b.num_groups());
    for (left, right) in a.groups().zip(b.groups()) {
        assert_eq!(left.name(), right.name());
        assert_eq!(left.face_indices(), right.face_indices());
    }
    assert_eq!(a.num_material_groups(), b.num_material_groups());
    for (left, right) in a.material_groups().zip(b.material_groups()) {
        assert_eq!(left.name(), right.name());
        assert_eq!(left.face_indices(), right.face_indices());
    }
}

#[test]
fn test_roundtrip_plain_mesh() {
    let mut obj = Obj::new();
    obj.add_vertex(0.0, 0.0, 0.0);
    obj.add_vertex(1.5, 0.0, 0.0);
    obj.add_vertex(0.0, 2.25, 0.0);
    obj.add_vertex(-0.5, 1.0, 3.0);
    obj.add_face(Face::triangle(0, 1, 2)).unwrap();
    obj.add_face(Face::new(vec![0, 2, 3], None, None).unwrap()).unwrap();

    let reread = roundtrip(&obj);
    assert_same_geometry(&obj, &reread);
    assert_same_groups(&obj, &reread);
    assert_eq!(obj.bounds(), reread.bounds());
}

#[test]
fn test_roundtrip_groups_and_materials() {
    let mut obj = Obj::new();
    for i in 0..6 {
        obj.add_vertex(i as f32, 0.0, 0.0);
        obj.add_tex_coord_2d(i as f32 / 6.0, 0.0);
    }
    obj.add_normal(0.0, 0.0, 1.0);

    obj.set_active_group_names(["wing", "left"]).unwrap();
    obj.set_active_material_group_name("steel");
    obj.add_face(
        Face::new(vec![0, 1, 2], Some(vec![0, 1, 2]), Some(vec![0, 0, 0])).unwrap(),
    )
    .unwrap();
    obj.add_face(
        Face::new(vec![1, 2, 3], Some(vec![1, 2, 3]), Some(vec![0, 0, 0])).unwrap(),
    )
    .unwrap();
    obj.set_active_group_names(["body"]).unwrap();
    obj.set_active_material_group_name("glass");
    obj.add_face(
        Face::new(vec![3, 4, 5], Some(vec![3, 4, 5]), Some(vec![0, 0, 0])).unwrap(),
    )
    .unwrap();

    let reread = roundtrip(&obj);
    assert_same_geometry(&obj, &reread);
    assert_same_groups(&obj, &reread);

    // Activation records survive the trip.
    for face_index in 0..obj.num_faces() {
        assert_eq!(
            obj.activated_group_names(face_index),
            reread.activated_group_names(face_index)
        );
        assert_eq!(
            obj.activated_material_group_name(face_index),
            reread.activated_material_group_name(face_index)
        );
    }
}

#[test]
fn test_roundtrip_file_name_lists() {
    let mut obj = Obj::new();
    obj.set_mtl_file_names(["a.mtl", "b.mtl"]);
    obj.set_act_file_names(["rig.act"]);

    let reread = roundtrip(&obj);
    assert_eq!(reread.mtl_file_names(), ["a.mtl", "b.mtl"]);
    assert_eq!(reread.act_file_names(), ["rig.act"]);
}

#[test]
fn test_roundtrip_is_stable_on_second_pass() {
    let mut obj = Obj::new();
    for i in 0..4 {
        obj.add_vertex(i as f32, 1.0, -1.0);
    }
    obj.set_active_group_names(["a"]).unwrap();
    obj.add_face(Face::triangle(0, 1, 2)).unwrap();
    obj.set_active_group_names(["b"]).unwrap();
    obj.add_face(Face::triangle(1, 2, 3)).unwrap();

    let once = roundtrip(&obj);
    let twice = roundtrip(&once);

    let mut first = Vec::new();
    once.to_writer(&mut first).unwrap();
    let mut second = Vec::new();
    twice.to_writer(&mut second).unwrap();
    assert_eq!(first, second, "Writing is a fixed point after one trip");
}
