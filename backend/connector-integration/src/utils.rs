pub mod xml_utils;
