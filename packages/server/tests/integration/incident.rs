use serde_json::json;

use crate::common::{MAX_PHOTO_SIZE, Photo, TestApp, routes};

mod create_incident {
    use super::*;

    #[tokio::test]
    async fn creates_incident_without_photo() {
        let app = TestApp::spawn().await;
        let ana = app.create_person("Ana").await;

        let res = app
            .upload_incident(Some(&ana), Some("Left the fridge open"), None)
            .await;
        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["personaId"], ana.as_str());
        assert_eq!(res.body["descripcion"], "Left the fridge open");
        assert!(res.body["foto"].is_null());
        assert!(res.body["fecha"].as_str().unwrap().ends_with('Z'));

        let list = app.get(routes::INCIDENTS).await;
        assert_eq!(list.status, 200);
        assert_eq!(list.body, json!([res.body]));
    }

    #[tokio::test]
    async fn stores_and_serves_photo() {
        let app = TestApp::spawn().await;
        let ana = app.create_person("Ana").await;
        let photo = Photo::png("evidence.PNG");
        let bytes = photo.bytes.clone();

        let res = app.upload_incident(Some(&ana), None, Some(photo)).await;
        assert_eq!(res.status, 201, "{}", res.text);

        let path = res.body["foto"].as_str().unwrap().to_string();
        assert!(path.starts_with("/uploads/"), "unexpected photo path {path}");
        assert!(path.ends_with(".png"));
        assert!(!path.contains("evidence"), "client file name must not be kept");
        assert_eq!(std::fs::read(app.photo_file(&path)).unwrap(), bytes);

        let served = app
            .client
            .get(format!("http://{}{}", app.addr, path))
            .send()
            .await
            .unwrap();
        assert_eq!(served.status(), 200);
        assert_eq!(served.bytes().await.unwrap().as_ref(), bytes.as_slice());
    }

    #[tokio::test]
    async fn empty_file_part_counts_as_no_photo() {
        let app = TestApp::spawn().await;
        let ana = app.create_person("Ana").await;
        let empty = Photo {
            file_name: "",
            mime: "application/octet-stream",
            bytes: Vec::new(),
        };

        let res = app.upload_incident(Some(&ana), None, Some(empty)).await;
        assert_eq!(res.status, 201, "{}", res.text);
        assert!(res.body["foto"].is_null());
        assert_eq!(app.stored_photo_count(), 0);
    }

    #[tokio::test]
    async fn named_empty_photo_is_rejected() {
        let app = TestApp::spawn().await;
        let ana = app.create_person("Ana").await;
        let empty = Photo {
            file_name: "blank.png",
            mime: "image/png",
            bytes: Vec::new(),
        };

        let res = app.upload_incident(Some(&ana), None, Some(empty)).await;
        assert_eq!(res.status, 400, "{}", res.text);
        assert_eq!(res.error_code(), "VALIDATION_ERROR");
        assert_eq!(app.stored_photo_count(), 0);
        assert_eq!(app.get(routes::INCIDENTS).await.body, json!([]));
    }

    #[tokio::test]
    async fn missing_person_id_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app.upload_incident(None, Some("no one"), None).await;
        assert_eq!(res.status, 400);
        assert_eq!(res.error_code(), "VALIDATION_ERROR");

        assert_eq!(app.get(routes::INCIDENTS).await.body, json!([]));
    }

    #[tokio::test]
    async fn unknown_person_is_not_found_and_photo_discarded() {
        let app = TestApp::spawn().await;

        let res = app
            .upload_incident(Some("does-not-exist"), None, Some(Photo::png("a.png")))
            .await;
        assert_eq!(res.status, 404);
        assert_eq!(res.error_code(), "NOT_FOUND");
        assert_eq!(app.stored_photo_count(), 0);
    }

    #[tokio::test]
    async fn unsupported_photo_type_is_rejected() {
        let app = TestApp::spawn().await;
        let ana = app.create_person("Ana").await;
        let pdf = Photo {
            file_name: "report.pdf",
            mime: "application/pdf",
            bytes: b"%PDF-1.4".to_vec(),
        };

        let res = app.upload_incident(Some(&ana), None, Some(pdf)).await;
        assert_eq!(res.status, 400);
        assert_eq!(res.error_code(), "VALIDATION_ERROR");
        assert_eq!(app.stored_photo_count(), 0);
        assert_eq!(app.get(routes::INCIDENTS).await.body, json!([]));
    }

    #[tokio::test]
    async fn image_extension_with_wrong_mime_is_rejected() {
        let app = TestApp::spawn().await;
        let ana = app.create_person("Ana").await;
        let disguised = Photo {
            file_name: "script.png",
            mime: "text/html",
            bytes: b"<script></script>".to_vec(),
        };

        let res = app.upload_incident(Some(&ana), None, Some(disguised)).await;
        assert_eq!(res.status, 400);
        assert_eq!(app.stored_photo_count(), 0);
    }

    #[tokio::test]
    async fn oversized_photo_is_rejected() {
        let app = TestApp::spawn().await;
        let ana = app.create_person("Ana").await;
        let big = Photo {
            file_name: "big.jpg",
            mime: "image/jpeg",
            bytes: vec![0xFF; MAX_PHOTO_SIZE as usize + 1],
        };

        let res = app.upload_incident(Some(&ana), None, Some(big)).await;
        assert_eq!(res.status, 400, "{}", res.text);
        assert_eq!(res.error_code(), "VALIDATION_ERROR");
        assert_eq!(app.stored_photo_count(), 0);
        assert_eq!(app.get(routes::INCIDENTS).await.body, json!([]));
    }
}

mod delete_incident {
    use super::*;

    #[tokio::test]
    async fn deletes_incident_and_its_photo() {
        let app = TestApp::spawn().await;
        let ana = app.create_person("Ana").await;
        let res = app
            .upload_incident(Some(&ana), None, Some(Photo::png("a.png")))
            .await;
        let id = res.id();
        let photo = app.photo_file(res.body["foto"].as_str().unwrap());
        assert!(photo.exists());

        let del = app.delete(&routes::incident(&id)).await;
        assert_eq!(del.status, 200, "{}", del.text);
        assert!(del.body["message"].as_str().is_some());

        assert!(!photo.exists());
        assert_eq!(app.get(routes::INCIDENTS).await.body, json!([]));
    }

    #[tokio::test]
    async fn missing_photo_file_does_not_block_delete() {
        let app = TestApp::spawn().await;
        let ana = app.create_person("Ana").await;
        let res = app
            .upload_incident(Some(&ana), None, Some(Photo::png("a.png")))
            .await;
        std::fs::remove_file(app.photo_file(res.body["foto"].as_str().unwrap())).unwrap();

        let del = app.delete(&routes::incident(&res.id())).await;
        assert_eq!(del.status, 200);
    }

    #[tokio::test]
    async fn unknown_incident_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app.delete(&routes::incident("does-not-exist")).await;
        assert_eq!(res.status, 404);
        assert_eq!(res.error_code(), "NOT_FOUND");
    }

    #[tokio::test]
    async fn deleting_person_releases_their_photos() {
        let app = TestApp::spawn().await;
        let ana = app.create_person("Ana").await;
        let luis = app.create_person("Luis").await;
        app.upload_incident(Some(&ana), None, Some(Photo::png("a.png")))
            .await;
        app.upload_incident(Some(&ana), None, Some(Photo::png("b.png")))
            .await;
        let kept = app
            .upload_incident(Some(&luis), None, Some(Photo::png("c.png")))
            .await;
        assert_eq!(app.stored_photo_count(), 3);

        assert_eq!(app.delete(&routes::delete_person(&ana)).await.status, 200);

        assert_eq!(app.stored_photo_count(), 1);
        assert!(app.photo_file(kept.body["foto"].as_str().unwrap()).exists());
    }
}
