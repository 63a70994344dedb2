mod class_sessions;
