use criterion::{criterion_group, criterion_main, Criterion};
use pathsteg_core::{
    image_simple_encode, jpeg_zigzag_encode, Image, Message, PixelImage, Plane,
    QuantizationConfig, Technique,
};

fn carrier() -> PixelImage {
    let mut rng = fastrand::Rng::with_seed(42);
    Image::Colour(
        Plane::from_fn(256, 256, |_, _| rng.u8(..)),
        Plane::from_fn(256, 256, |_, _| rng.u8(..)),
        Plane::from_fn(256, 256, |_, _| rng.u8(..)),
    )
}

pub fn image_encoding(c: &mut Criterion) {
    let plain_image = carrier();
    let secret_message = Message::new("Hello World!".repeat(64));

    c.bench_function("Image Encoding", |b| {
        let mut image = plain_image.clone();
        b.iter(|| {
            image_simple_encode(&mut image, &secret_message, Technique::Matching)
                .expect("Cannot write secret message");
        })
    });

    c.bench_function("Coefficient Encoding", |b| {
        let config = QuantizationConfig::with_quality(75);
        b.iter(|| {
            jpeg_zigzag_encode(&plain_image, &secret_message, &config, Technique::Matching)
                .expect("Cannot write secret message");
        })
    });
}

criterion_group!(benches, image_encoding);
criterion_main!(benches);
