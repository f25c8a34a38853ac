use criterion::{criterion_group, criterion_main, Criterion};
use pathsteg_core::{
    image_key_decode, image_key_encode, jpeg_zigzag_decode, jpeg_zigzag_encode, Image, Message,
    PixelImage, Plane, QuantizationConfig, SecretKey, Technique,
};

fn carrier() -> PixelImage {
    let mut rng = fastrand::Rng::with_seed(42);
    Image::Colour(
        Plane::from_fn(256, 256, |_, _| rng.u8(..)),
        Plane::from_fn(256, 256, |_, _| rng.u8(..)),
        Plane::from_fn(256, 256, |_, _| rng.u8(..)),
    )
}

pub fn image_decoding(c: &mut Criterion) {
    let secret_message = Message::new("Hello World!".repeat(64));
    let key = SecretKey::generate();

    let mut secret_image = carrier();
    image_key_encode(&mut secret_image, &secret_message, &key, Technique::Matching)
        .expect("Cannot hide secret message");
    c.bench_function("Image Decoding", |b| {
        b.iter(|| image_key_decode(&secret_image, &key).expect("Cannot unveil secret message"))
    });

    let coefficients = jpeg_zigzag_encode(
        &carrier(),
        &secret_message,
        &QuantizationConfig::with_quality(75),
        Technique::Matching,
    )
    .expect("Cannot hide secret message");
    c.bench_function("Coefficient Decoding", |b| {
        b.iter(|| jpeg_zigzag_decode(&coefficients).expect("Cannot unveil secret message"))
    });
}

criterion_group!(benches, image_decoding);
criterion_main!(benches);
