//! Tests for the OBJ text writer.

use std::io::Cursor;

use libobj::{Face, FloatTuple, Obj};

fn write(obj: &Obj) -> String {
    let mut out = Vec::new();
    obj.to_writer(&mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn test_write_plain_model_emits_no_group_directives() {
    let mut obj = Obj::new();
    obj.add_vertex(0.0, 0.0, 0.0);
    obj.add_vertex(1.0, 0.0, 0.0);
    obj.add_vertex(0.0, 1.0, 0.0);
    obj.add_face(Face::triangle(0, 1, 2)).unwrap();

    assert_eq!(write(&obj), "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n");
}

#[test]
fn test_write_emits_directives_at_activation_points() {
    let mut obj = Obj::new();
    for i in 0..4 {
        obj.add_vertex(i as f32, 0.0, 0.0);
    }
    obj.set_active_group_names(["wing"]).unwrap();
    obj.set_active_material_group_name("steel");
    obj.add_face(Face::triangle(0, 1, 2)).unwrap();
    obj.add_face(Face::triangle(1, 2, 3)).unwrap();
    obj.set_active_group_names(["body", "hull"]).unwrap();
    obj.add_face(Face::triangle(0, 2, 3)).unwrap();

    let text = write(&obj);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        [
            "v 0 0 0",
            "v 1 0 0",
            "v 2 0 0",
            "v 3 0 0",
            "g wing",
            "usemtl steel",
            "f 1 2 3",
            "f 2 3 4",
            "g body hull",
            "f 1 3 4",
        ]
    );
}

#[test]
fn test_write_file_name_lists_first() {
    let mut obj = Obj::new();
    obj.set_mtl_file_names(["a.mtl", "b.mtl"]);
    obj.set_act_file_names(["rig.act"]);
    let text = write(&obj);
    assert_eq!(text, "mtllib a.mtl b.mtl\nactlib rig.act\n");
}

#[test]
fn test_write_tex_coords_and_normals() {
    let mut obj = Obj::new();
    obj.add_vertex(0.0, 0.0, 0.0);
    obj.add_vertex(1.0, 0.0, 0.0);
    obj.add_vertex(0.0, 1.0, 0.0);
    obj.add_tex_coord_2d(0.0, 0.5);
    obj.add_tex_coord(0.25);
    obj.add_normal(0.0, 0.0, 1.0);
    obj.add_face(
        Face::new(vec![0, 1, 2], Some(vec![0, 0, 1]), Some(vec![0, 0, 0])).unwrap(),
    )
    .unwrap();

    let text = write(&obj);
    assert!(text.contains("vt 0 0.5\n"));
    assert!(text.contains("vt 0.25\n"));
    assert!(text.contains("vn 0 0 1\n"));
    assert!(text.contains("f 1/1/1 2/1/1 3/2/1\n"));
}

#[test]
fn test_write_negative_coordinates() {
    let mut obj = Obj::new();
    obj.add_vertex_tuple(FloatTuple::new3(-1.5, 0.0, 2.25)).unwrap();
    assert_eq!(write(&obj), "v -1.5 0 2.25\n");
}

#[test]
fn test_write_to_file_round_trips() {
    let mut obj = Obj::new();
    obj.add_vertex(0.0, 0.0, 0.0);
    obj.add_vertex(1.0, 0.0, 0.0);
    obj.add_vertex(0.0, 1.0, 0.0);
    obj.set_active_group_names(["wing"]).unwrap();
    obj.add_face(Face::triangle(0, 1, 2)).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.obj");
    obj.write_to_file(&path).unwrap();

    let file = std::fs::File::open(&path).unwrap();
    let reread = Obj::from_reader(std::io::BufReader::new(file)).unwrap();
    assert_eq!(reread.num_vertices(), 3);
    assert_eq!(reread.group_by_name("wing").unwrap().face_indices(), &[0]);
}

#[test]
fn test_written_text_parses_back() {
    let mut obj = Obj::new();
    for i in 0..3 {
        obj.add_vertex(i as f32, (i * 2) as f32, 0.0);
    }
    obj.set_active_material_group_name("glass");
    obj.add_face(Face::triangle(0, 1, 2)).unwrap();

    let text = write(&obj);
    let reread = Obj::from_reader(Cursor::new(text)).unwrap();
    assert_eq!(reread.activated_material_group_name(0), Some("glass"));
}
