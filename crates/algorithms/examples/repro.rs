use verdant_core::io::{read_geotiff, write_geotiff};
use verdant_core::raster::{Band, GeoTransform};
use verdant_algorithms::imagery::ndvi;

fn main() {
    let dir = tempfile::tempdir().unwrap();
    let mut red = Band::filled(20, 20, 0.1f32);
    red.set_transform(GeoTransform::new(399960.0, 6300040.0, 10.0, -10.0));
    let red_path = dir.path().join("red.tif");
    write_geotiff(&red, &red_path, None).unwrap();

    let mut nir = Band::filled(20, 20, 0.5f32);
    nir.set_transform(GeoTransform::new(399960.0, 6300040.0, 10.0, -10.0));
    let nir_path = dir.path().join("nir.tif");
    write_geotiff(&nir, &nir_path, None).unwrap();

    let red2 = read_geotiff(&red_path, None).unwrap();
    let nir2 = read_geotiff(&nir_path, None).unwrap();
    println!("red2 transform = {:?}", red2.transform());
    println!("nir2 transform = {:?}", nir2.transform());

    let out = ndvi(&nir2, &red2).unwrap();
    println!("out transform = {:?}", out.transform());

    let out_path = dir.path().join("out.tif");
    write_geotiff(&out, &out_path, None).unwrap();

    let out2 = read_geotiff(&out_path, None).unwrap();
    println!("out2 transform = {:?}", out2.transform());
}
