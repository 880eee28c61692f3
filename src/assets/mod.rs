pub mod textures;

/// Arguments:
/// 1. The name of the `LazyLock<Image<'static>>` to be available as.
///    That name, combined with `_SOURCE`, yields the `ImageSource<'static>` that you can use.
/// 2. A string containing the relative path to the image. A `./` is prepended automatically.
/// Usage:
/// ```ignore
/// use_img!(PAUSED_IMAGE, "pause.svg");
/// ```
macro_rules! use_img {
    ($name:ident, $path:literal) => {
        ::pastey::paste! {
            pub(crate) const [<$name _SOURCE>]:
                ::three_d::egui::ImageSource<'static> = ::three_d::egui::ImageSource::Bytes {
                    uri: ::std::borrow::Cow::Borrowed(
                        concat!("bytes://", $path)
                    ),
                    bytes: ::three_d::egui::load::Bytes::Static(
                        include_bytes!(
                            concat!("./", $path)
                        )
                    )
                };

            pub(crate) static $name: ::std::sync::LazyLock<::three_d::egui::Image<'static>> =
                ::std::sync::LazyLock::new(|| ::three_d::egui::Image::new([<$name _SOURCE>]));
        }
    };
}

use_img!(PAUSED_IMAGE, "pause.svg");
use_img!(PLAY_IMAGE, "play.svg");
