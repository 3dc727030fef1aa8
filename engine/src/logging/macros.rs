/// Log through `tracing` when the scope is enabled in the active [`LogConfig`](super::LogConfig).
///
/// `scoped_log!(DEBUG, "locomotion", "moved {}", dist)`
#[macro_export]
macro_rules! scoped_log {
    ($level:ident, $scope:expr, $($arg:tt)*) => {{
        let log_config = $crate::logging::get_log_config();
        if log_config.should_log($scope, $crate::logging::Level::$level) {
            $crate::logging::tracing::event!(
                $crate::logging::Level::$level,
                scope = $scope,
                $($arg)*
            );
        }
    }};
}

#[macro_export]
macro_rules! locomotion_log {
    ($level:ident, $($arg:tt)*) => {
        $crate::scoped_log!($level, "locomotion", $($arg)*)
    };
}

#[macro_export]
macro_rules! input_log {
    ($level:ident, $($arg:tt)*) => {
        $crate::scoped_log!($level, "input", $($arg)*)
    };
}

#[macro_export]
macro_rules! nav_log {
    ($level:ident, $($arg:tt)*) => {
        $crate::scoped_log!($level, "nav", $($arg)*)
    };
}

#[macro_export]
macro_rules! render_log {
    ($level:ident, $($arg:tt)*) => {
        $crate::scoped_log!($level, "render", $($arg)*)
    };
}

#[macro_export]
macro_rules! assets_log {
    ($level:ident, $($arg:tt)*) => {
        $crate::scoped_log!($level, "assets", $($arg)*)
    };
}

#[macro_export]
macro_rules! frame_log {
    ($level:ident, $($arg:tt)*) => {
        $crate::scoped_log!($level, "frame", $($arg)*)
    };
}
