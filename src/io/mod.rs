mod view;

pub use view::ByteView;
