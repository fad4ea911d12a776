fn main() {
    slint_build::compile("ui/selector.slint").expect("failed to compile selector.slint");
}
