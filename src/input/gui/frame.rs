/// Copies a packed RGB buffer into an RGBA frame, forcing alpha opaque.
pub(super) fn copy_rgb_into_rgba(rgb: &[u8], rgba: &mut [u8]) {
    for (src, dst) in rgb.chunks_exact(3).zip(rgba.chunks_exact_mut(4)) {
        dst[..3].copy_from_slice(src);
        dst[3] = 255;
    }
}
